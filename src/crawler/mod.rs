//! # Page Fetching Module
//!
//! This module fetches a single web page and renders it to markdown. It is
//! the first stage of every tool: the scrape tool returns the markdown as is,
//! the query tool searches it, and the smart tool hands it to the LLM.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: User agent, robots.txt policy, timeout and rendering options
//! - `FetchedPage`: A fetched page with its markdown content
//! - `PageFetcher`: The seam tools fetch through, so tests can stub the network
//! - `SpiderFetcher`: The `spider`-backed implementation
//!
//! ## Features
//!
//! - URL validation (only `http` and `https`)
//! - HTML to Markdown conversion with `spider_utils` transformations
//! - Request and overall timeouts
//! - Non-success HTTP statuses surface as errors

mod config;
mod error;
mod spider_integration;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use error::CrawlError;
pub use spider_integration::{validate_url, SpiderFetcher};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A fetched page rendered to markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL of the page
    pub url: String,

    /// Content of the page in Markdown format
    pub markdown: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markdown: markdown.into(),
        }
    }

    /// Whether the page rendered to no markdown at all
    ///
    /// Whitespace-only markdown still counts as content.
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }
}

/// Fetches a page and renders it to markdown
pub trait PageFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedPage, CrawlError>>;
}
