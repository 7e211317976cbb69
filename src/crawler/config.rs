//! # Crawler Configuration Module
//!
//! Configuration for single-page fetches. It uses a builder pattern for
//! flexible configuration and deserializes from the `crawler` section of the
//! configuration file.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with fetch parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// User agent to use for requests
    pub user_agent: String,

    /// Whether to respect robots.txt
    pub respect_robots_txt: bool,

    /// Upper bound on a whole fetch, in seconds
    pub timeout_secs: u64,

    /// Keep only the main readable content instead of the whole page
    pub readability: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("webcrawl/{}", env!("CARGO_PKG_VERSION")),
            respect_robots_txt: true,
            timeout_secs: 30,
            readability: false,
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set whether to respect robots.txt
    pub fn respect_robots_txt(mut self, respect_robots_txt: bool) -> Self {
        self.config.respect_robots_txt = respect_robots_txt;
        self
    }

    /// Set the fetch timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set whether to keep only the main readable content
    pub fn readability(mut self, readability: bool) -> Self {
        self.config.readability = readability;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
