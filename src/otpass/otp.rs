//! Time-based one-time passwords (RFC 6238) over an account's base32 secret.

use crate::error::{OtpassError, Result};
use crate::model::{Account, Searchable, Secret};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use totp_rs::{Algorithm, Secret as EncodedSecret, TOTP};

pub const DEFAULT_DIGITS: usize = 6;
pub const DEFAULT_PERIOD: u64 = 30;

// Only consulted when checking codes, never when generating them.
const SKEW: u8 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl From<HashAlgorithm> for Algorithm {
    fn from(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha1 => Algorithm::SHA1,
            HashAlgorithm::Sha256 => Algorithm::SHA256,
            HashAlgorithm::Sha512 => Algorithm::SHA512,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpSettings {
    pub digits: usize,
    pub period: u64,
    pub algorithm: HashAlgorithm,
}

impl OtpSettings {
    pub fn validate(&self) -> Result<()> {
        if !(6..=8).contains(&self.digits) {
            return Err(OtpassError::Config(format!(
                "digits must be between 6 and 8, got {}",
                self.digits
            )));
        }
        if self.period == 0 {
            return Err(OtpassError::Config("period must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            algorithm: HashAlgorithm::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub code: String,
    /// Seconds until the code rolls over.
    pub expires_in: u64,
}

/// Generates the code for `secret` at `unix_seconds`.
///
/// Returns `None` if the secret is not valid base32.
pub fn generate_at(secret: &Secret, settings: &OtpSettings, unix_seconds: u64) -> Option<String> {
    let key = decode_secret(secret)?;
    let totp = TOTP::new_unchecked(
        settings.algorithm.into(),
        settings.digits,
        SKEW,
        settings.period,
        key,
    );
    Some(totp.generate(unix_seconds))
}

/// Decodes a base32 secret, tolerating lowercase, spaces and `=` padding.
fn decode_secret(secret: &Secret) -> Option<Vec<u8>> {
    let normalized: String = secret
        .expose()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return None;
    }
    EncodedSecret::Encoded(normalized).to_bytes().ok()
}

impl Account {
    pub fn generate_code(&self, settings: &OtpSettings, at: DateTime<Utc>) -> Result<GeneratedCode> {
        settings.validate()?;
        let unix_seconds =
            u64::try_from(at.timestamp()).map_err(|_| OtpassError::BeforeEpoch(at.timestamp()))?;
        let code = generate_at(self.secret(), settings, unix_seconds)
            .ok_or_else(|| OtpassError::InvalidSecret(self.name().to_string()))?;
        Ok(GeneratedCode {
            code,
            expires_in: settings.period - unix_seconds % settings.period,
        })
    }
}
