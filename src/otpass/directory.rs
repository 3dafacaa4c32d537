//! # Directory Loading
//!
//! The directory arrives as a YAML document (JSON works too, being a YAML subset):
//!
//! ```yaml
//! GitHub:
//!   alias: gh
//!   accounts:
//!     - alice: JBSWY3DPEHPK3PXP
//!     - bob: KRSXG5CTMVRXEZLU
//! Amazon Web Services:
//!   alias: aws
//!   accounts:
//!     - root: GEZDGNBVGY3TQOJQ
//! ```
//!
//! Providers and accounts keep document order, which matters: when only a provider
//! is queried, its first account is the one used.
//!
//! Loading is all-or-nothing. Any structural problem rejects the whole document with
//! [`OtpassError::MalformedDirectory`] naming the offending provider or entry.

use crate::error::{OtpassError, Result};
use crate::model::{Account, Provider, ProviderId, Searchable, Secret};
use serde_yaml::{Mapping, Value};
use std::io::Read;
use tracing::debug;

const ALIAS_KEY: &str = "alias";
const ACCOUNTS_KEY: &str = "accounts";

/// Providers in document order, each owning its accounts.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    providers: Vec<Provider>,
}

impl Directory {
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn provider(&self, id: ProviderId) -> Option<&Provider> {
        self.providers.get(id.index())
    }

    /// Every account, provider by provider, in load order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.providers.iter().flat_map(|p| p.accounts().iter())
    }
}

/// Reads the whole of `reader` and loads it.
pub fn read_from<R: Read>(mut reader: R) -> Result<Directory> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    load(&raw)
}

pub fn load(raw: &str) -> Result<Directory> {
    let doc: Value = serde_yaml::from_str(raw)
        .map_err(|e| OtpassError::MalformedDirectory(e.to_string()))?;

    let root = match doc {
        Value::Mapping(root) => root,
        Value::Null => {
            return Err(OtpassError::MalformedDirectory(
                "document is empty".to_string(),
            ))
        }
        _ => {
            return Err(OtpassError::MalformedDirectory(
                "expected a mapping of provider names".to_string(),
            ))
        }
    };

    let mut providers = Vec::with_capacity(root.len());
    for (key, entry) in &root {
        let name = scalar_to_string(key).ok_or_else(|| {
            OtpassError::MalformedDirectory("provider names must be scalars".to_string())
        })?;
        let provider = load_provider(ProviderId(providers.len()), name, entry)?;
        debug!(
            provider = provider.name(),
            accounts = provider.accounts().len(),
            "loaded provider"
        );
        providers.push(provider);
    }

    Ok(Directory { providers })
}

fn load_provider(id: ProviderId, name: String, entry: &Value) -> Result<Provider> {
    let fields = entry.as_mapping().ok_or_else(|| {
        OtpassError::MalformedDirectory(format!("provider '{}' must be a mapping", name))
    })?;

    let mut provider = Provider::new(id, name);

    match fields.get(ALIAS_KEY) {
        None | Some(Value::Null) => {}
        Some(alias) => {
            let alias = scalar_to_string(alias).ok_or_else(|| {
                OtpassError::MalformedDirectory(format!(
                    "alias of provider '{}' must be a string",
                    provider.name()
                ))
            })?;
            provider.add_alias(alias);
        }
    }

    let accounts = fields
        .get(ACCOUNTS_KEY)
        .and_then(Value::as_sequence)
        .ok_or_else(|| {
            OtpassError::MalformedDirectory(format!(
                "provider '{}' needs an '{}' list",
                provider.name(),
                ACCOUNTS_KEY
            ))
        })?;

    for (position, account) in accounts.iter().enumerate() {
        let (account_name, secret) = account
            .as_mapping()
            .and_then(single_pair)
            .ok_or_else(|| {
                OtpassError::MalformedDirectory(format!(
                    "account #{} of provider '{}' must be a single 'name: secret' pair",
                    position + 1,
                    provider.name()
                ))
            })?;
        provider.add_account(account_name, Secret::new(secret));
    }

    Ok(provider)
}

fn single_pair(mapping: &Mapping) -> Option<(String, String)> {
    if mapping.len() != 1 {
        return None;
    }
    let (name, secret) = mapping.iter().next()?;
    Some((scalar_to_string(name)?, scalar_to_string(secret)?))
}

// YAML reads bare names like `1234` or `true` as numbers and booleans.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
