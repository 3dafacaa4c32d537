use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtpassError {
    #[error("{0}")]
    Usage(String),

    #[error("No Match For: {0}")]
    NoMatch(String),

    #[error("No accounts under provider: {0}")]
    EmptyCandidates(String),

    #[error("Malformed directory: {0}")]
    MalformedDirectory(String),

    #[error("Invalid secret for account: {0}")]
    InvalidSecret(String),

    #[error("Time is before the Unix epoch: {0}")]
    BeforeEpoch(i64),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OtpassError>;
