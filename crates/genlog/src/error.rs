//! Error types for logger configuration.
//!
//! Logging itself never fails: malformed key/value lists and unserializable
//! values are recovered in place. Only building a logger from external
//! configuration can go wrong.

use thiserror::Error;

/// Errors that can occur while configuring a logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// A verbosity setting was not a valid integer.
    #[error("invalid verbosity: {0:?}")]
    InvalidVerbosity(String),

    /// A boolean setting could not be parsed.
    #[error("invalid flag value for {key}: {value:?}")]
    InvalidFlag {
        /// Setting that failed to parse.
        key: &'static str,
        /// Raw text that was supplied.
        value: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, LogError>;
