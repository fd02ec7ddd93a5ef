//! Error types for tally.

use thiserror::Error;

/// Errors that can occur across the tally CLI.
#[derive(Debug, Error)]
pub enum TallyError {
    /// I/O failure reading or writing data files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration problem (missing home dir, bad config file, etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage layer failure that is not a plain I/O error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}
