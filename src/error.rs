//! Error types for the webcrawl crate

use thiserror::Error;

/// Result type for webcrawl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for webcrawl operations
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
