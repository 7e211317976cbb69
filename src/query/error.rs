//! Error types for the keyword query module

use thiserror::Error;

/// Invalid arguments to a keyword context search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The keyword was the empty string
    #[error("keyword must not be empty")]
    EmptyKeyword,

    /// The match cap was zero
    #[error("max_matches must be at least 1")]
    ZeroMaxMatches,
}
