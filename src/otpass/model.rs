use crate::fuzzy;
use std::collections::BTreeSet;
use std::fmt;

/// Lowercases `name` and keeps only its alphanumeric characters.
///
/// Lowercasing happens first so the result is stable under repeated application.
pub fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Every string a [`Searchable`] answers to.
///
/// Always holds the canonical name and its sanitized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet {
    aliases: BTreeSet<String>,
}

impl AliasSet {
    pub fn new(name: &str) -> Self {
        let mut aliases = BTreeSet::new();
        aliases.insert(name.to_string());
        aliases.insert(sanitize(name));
        Self { aliases }
    }

    pub fn insert(&mut self, alias: impl Into<String>) {
        self.aliases.insert(alias.into());
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    /// Highest fuzzy score of `query` over all aliases.
    pub fn best_score(&self, query: &str) -> u8 {
        fuzzy::best_score(query, self.iter())
    }
}

/// Anything the resolver can fuzzy-match by name.
pub trait Searchable {
    fn name(&self) -> &str;

    fn aliases(&self) -> &AliasSet;

    fn sanitized_name(&self) -> String {
        sanitize(self.name())
    }

    /// Similarity of `query` to this entity, 0 to 100.
    fn fuzzy_score(&self, query: &str) -> u8 {
        self.aliases().best_score(query)
    }
}

/// Position of a [`Provider`] inside its [`crate::directory::Directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(pub(crate) usize);

impl ProviderId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Base32 TOTP secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

#[derive(Debug, Clone)]
pub struct Provider {
    id: ProviderId,
    name: String,
    aliases: AliasSet,
    accounts: Vec<Account>,
}

impl Provider {
    pub fn new(id: ProviderId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            aliases: AliasSet::new(&name),
            name,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.insert(alias);
    }

    /// Appends an account bound to this provider.
    pub fn add_account(&mut self, name: impl Into<String>, secret: Secret) {
        self.accounts.push(Account::new(name, self.id, secret));
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}

impl Searchable for Provider {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &AliasSet {
        &self.aliases
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    aliases: AliasSet,
    provider: ProviderId,
    secret: Secret,
}

impl Account {
    pub fn new(name: impl Into<String>, provider: ProviderId, secret: Secret) -> Self {
        let name = name.into();
        Self {
            aliases: AliasSet::new(&name),
            name,
            provider,
            secret,
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

impl Searchable for Account {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &AliasSet {
        &self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_symbols_and_underscores() {
        assert_eq!(sanitize("GitHub"), "github");
        assert_eq!(sanitize("Amazon Web Services"), "amazonwebservices");
        assert_eq!(sanitize("my_work-account@corp.com"), "myworkaccountcorpcom");
        assert_eq!(sanitize("!!!"), "");
        assert_eq!(sanitize("Ärzte 24"), "ärzte24");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "GitHub",
            "  spaced  out ",
            "İstanbul Bank",
            "ÅSTRÖM_Ltd.",
            "",
            "σΣς",
            "KELVIN \u{212a}",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn alias_set_starts_with_name_and_sanitized_form() {
        let aliases = AliasSet::new("Git Hub");
        assert!(aliases.contains("Git Hub"));
        assert!(aliases.contains("github"));
        assert_eq!(aliases.iter().count(), 2);
    }

    #[test]
    fn alias_set_collapses_duplicates() {
        let mut aliases = AliasSet::new("github");
        assert_eq!(aliases.iter().count(), 1);
        aliases.insert("github");
        aliases.insert("gh");
        aliases.insert("gh");
        assert_eq!(aliases.iter().count(), 2);
    }

    #[test]
    fn provider_aliases_include_configured_alias() {
        let mut provider = Provider::new(ProviderId(0), "Amazon Web Services");
        provider.add_alias("aws");
        assert!(provider.aliases().contains("aws"));
        assert!(provider.aliases().contains(&provider.sanitized_name()));
        assert_eq!(provider.fuzzy_score("aws"), 100);
    }

    #[test]
    fn accounts_keep_insertion_order_and_provider_handle() {
        let mut provider = Provider::new(ProviderId(3), "GitHub");
        provider.add_account("alice", Secret::new("AAAA"));
        provider.add_account("bob", Secret::new("BBBB"));

        let names: Vec<&str> = provider.accounts().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert!(provider
            .accounts()
            .iter()
            .all(|a| a.provider() == ProviderId(3)));
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let account = Account::new("alice", ProviderId(0), Secret::new("JBSWY3DPEHPK3PXP"));
        let debug = format!("{:?}", account);
        assert!(!debug.contains("JBSWY3DPEHPK3PXP"));
        assert!(debug.contains("alice"));
        assert!(!account.aliases().contains("JBSWY3DPEHPK3PXP"));
    }

    #[test]
    fn fuzzy_score_tolerates_typos() {
        let provider = Provider::new(ProviderId(0), "GitHub");
        assert_eq!(provider.fuzzy_score("github"), 100);
        assert_eq!(provider.fuzzy_score("gihtub"), 83);
        assert!(provider.fuzzy_score("doesnotexist") <= 55);
    }
}
