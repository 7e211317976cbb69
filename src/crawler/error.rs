//! Error types for the crawler module

use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// URL with a scheme other than http or https
    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The fetch did not finish in time
    #[error("timed out after {secs}s fetching {url}")]
    Timeout {
        /// URL being fetched
        url: String,
        /// Configured timeout
        secs: u64,
    },

    /// The crawler produced no page for the URL
    #[error("no response received from {0}")]
    NoResponse(String),

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// URL being fetched
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}
