//! Error types for the extraction module

use crate::crawler::CrawlError;
use rig::completion::CompletionError;
use thiserror::Error;

/// Error type for LLM extraction
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The page could not be fetched
    #[error("{0}")]
    Fetch(#[from] CrawlError),

    /// The provider call failed
    #[error("LLM request failed: {0}")]
    Completion(#[from] CompletionError),

    /// The instruction was blank
    #[error("instruction must not be empty")]
    EmptyInstruction,

    /// Other errors
    #[error("{0}")]
    Other(String),
}
