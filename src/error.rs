//! Error types for Tingli.

use thiserror::Error;

/// Library-level error type for Tingli operations.
#[derive(Error, Debug)]
pub enum TingliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No phrases could be parsed from the script")]
    NoPhrasesParsed,

    #[error(
        "Script timestamps must be strictly increasing: line {line} starts at \
         {start_seconds}s, but the previous phrase starts at {previous_seconds}s"
    )]
    TimestampOrdering {
        line: usize,
        start_seconds: f64,
        previous_seconds: f64,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Tingli operations.
pub type Result<T> = std::result::Result<T, TingliError>;
