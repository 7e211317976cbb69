//! Tool outcomes that are not a plain success
//!
//! Every variant's `Display` is the exact text returned to the caller. Some
//! variants are failures; the rest are informational results.

use thiserror::Error;

use crate::crawler::CrawlError;
use crate::extraction::ExtractionError;
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The scrape tool could not fetch the page
    #[error("[ERROR] Failed to scrape: {0}")]
    Scrape(#[source] CrawlError),

    /// The query tool could not fetch the page
    #[error("[ERROR] Problem during query search: {0}")]
    QueryFetch(#[source] CrawlError),

    /// The query tool was given invalid search arguments
    #[error("[ERROR] Problem during query search: {0}")]
    Query(#[from] QueryError),

    /// The smart tool failed while fetching or calling the model
    #[error("[ERROR] Smart extract failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The scrape tool fetched a page with no content
    #[error("No content retrieved.")]
    EmptyPage,

    /// The query tool fetched a page with no content
    #[error("No readable content found on: {url}")]
    NoReadableContent {
        /// Fetched URL
        url: String,
    },

    /// The smart tool has no provider API key
    #[error("Missing Gemini API key. Please define GOOGLE_API_KEY or GEMINI_API_KEY.")]
    MissingCredential,

    /// The model extracted nothing for the instruction
    #[error("No data extracted using instruction: '{instruction}'")]
    NothingExtracted {
        /// Instruction as supplied
        instruction: String,
    },
}

impl ToolError {
    /// Whether this outcome is a failure rather than an informational result
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ToolError::Scrape(_)
                | ToolError::QueryFetch(_)
                | ToolError::Query(_)
                | ToolError::Extraction(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_are_prefixed() {
        let err = ToolError::Scrape(CrawlError::NoResponse("https://example.com".to_string()));
        assert_eq!(
            err.to_string(),
            "[ERROR] Failed to scrape: no response received from https://example.com"
        );
        assert!(err.is_failure());

        let err = ToolError::from(QueryError::EmptyKeyword);
        assert_eq!(
            err.to_string(),
            "[ERROR] Problem during query search: keyword must not be empty"
        );
        assert!(err.is_failure());
    }

    #[test]
    fn test_informational_outcomes() {
        let outcomes = [
            ToolError::EmptyPage,
            ToolError::NoReadableContent {
                url: "https://example.com".to_string(),
            },
            ToolError::MissingCredential,
            ToolError::NothingExtracted {
                instruction: "prices".to_string(),
            },
        ];

        for outcome in &outcomes {
            assert!(!outcome.is_failure(), "{} should be informational", outcome);
            assert!(!outcome.to_string().starts_with("[ERROR]"));
        }
        assert_eq!(
            outcomes[3].to_string(),
            "No data extracted using instruction: 'prices'"
        );
    }
}
