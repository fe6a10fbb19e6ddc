//! Error types for the tickstamp system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tickstamp system.
#[derive(Error, Debug)]
pub enum Error {
    /// A date string that is not `YYYY-MM-DD`.
    #[error("Invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid date error.
    pub fn invalid_date(input: impl Into<String>, source: chrono::ParseError) -> Self {
        Error::InvalidDate {
            input: input.into(),
            source,
        }
    }
}
