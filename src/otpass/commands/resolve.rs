//! Two-stage fuzzy lookup: narrow by provider, then pick an account.

use crate::directory::Directory;
use crate::error::{OtpassError, Result};
use crate::fuzzy;
use crate::model::{Account, Searchable};
use tracing::{debug, warn};

/// Scores at or below this never match.
pub const MATCH_FLOOR: u8 = 55;

/// Returns the best scoring candidate above [`MATCH_FLOOR`].
///
/// Only a strictly higher score replaces the current best, so the earliest
/// candidate wins ties.
pub fn fuzzy_match<'a, T, I>(candidates: I, query: &str) -> Option<&'a T>
where
    T: Searchable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if fuzzy::full_process(query).is_empty() {
        warn!(query, "query has no searchable characters, nothing can match");
    }

    let mut best = None;
    let mut best_score = MATCH_FLOOR;
    for candidate in candidates {
        let score = candidate.fuzzy_score(query);
        debug!(query, candidate = candidate.name(), score, "scored candidate");
        if score > best_score {
            best = Some(candidate);
            best_score = score;
        }
    }
    best
}

/// Resolves the queries to a single account.
///
/// Without a provider query every account is a candidate. Without an account query
/// the first candidate wins. Callers must supply at least one query.
pub fn resolve_account<'a>(
    directory: &'a Directory,
    provider_query: Option<&str>,
    account_query: Option<&str>,
) -> Result<&'a Account> {
    let mut candidates: Vec<&Account> = directory.accounts().collect();
    let mut scope = None;

    if let Some(query) = provider_query {
        let provider = fuzzy_match(directory.providers(), query)
            .ok_or_else(|| OtpassError::NoMatch(query.to_string()))?;
        debug!(provider = provider.name(), "provider matched");
        candidates = provider.accounts().iter().collect();
        scope = Some(provider.name());
    }

    match account_query {
        Some(query) => fuzzy_match(candidates, query)
            .ok_or_else(|| OtpassError::NoMatch(query.to_string())),
        None => candidates.first().copied().ok_or_else(|| {
            OtpassError::EmptyCandidates(scope.unwrap_or("(all providers)").to_string())
        }),
    }
}
