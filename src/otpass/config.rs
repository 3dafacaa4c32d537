use crate::error::{OtpassError, Result};
use crate::otp::{HashAlgorithm, OtpSettings, DEFAULT_DIGITS, DEFAULT_PERIOD};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "OTPASS_CONFIG_DIR";

/// Configuration for otpass, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtpassConfig {
    /// Number of digits in generated codes (6 to 8)
    #[serde(default = "default_digits")]
    pub digits: usize,

    /// Seconds each code stays valid
    #[serde(default = "default_period")]
    pub period: u64,

    /// HMAC hash used for codes ("sha1", "sha256" or "sha512")
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Copy codes to the clipboard unless `--no-clip` is given
    #[serde(default = "default_clipboard")]
    pub clipboard: bool,
}

fn default_digits() -> usize {
    DEFAULT_DIGITS
}

fn default_period() -> u64 {
    DEFAULT_PERIOD
}

fn default_clipboard() -> bool {
    true
}

impl Default for OtpassConfig {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            algorithm: HashAlgorithm::default(),
            clipboard: true,
        }
    }
}

impl OtpassConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(OtpassError::Io)?;
        let config: OtpassConfig =
            serde_json::from_str(&content).map_err(OtpassError::Serialization)?;
        config.otp_settings().validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(OtpassError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(OtpassError::Serialization)?;
        fs::write(config_path, content).map_err(OtpassError::Io)?;
        Ok(())
    }

    pub fn otp_settings(&self) -> OtpSettings {
        OtpSettings {
            digits: self.digits,
            period: self.period,
            algorithm: self.algorithm,
        }
    }
}

/// `$OTPASS_CONFIG_DIR` if set, otherwise the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "otpass", "otpass")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| OtpassError::Config("Could not determine config dir".to_string()))
}
