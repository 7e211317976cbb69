//! # Extraction Configuration Module
//!
//! Configuration for LLM-guided extraction: which model to call, how hot it
//! runs, how fast it may be called, and how page content is split before it is
//! sent. The provider API key lives here too; it is filled in once at startup
//! and never re-read.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for the structured extractor
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider API key; extraction is unavailable without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name passed to the provider
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Request quota per minute
    pub requests_per_minute: u32,

    /// Maximum characters of page content per LLM call
    pub chunk_chars: usize,

    /// Maximum chunk calls in flight
    pub max_concurrency: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.2,
            requests_per_minute: 30,
            chunk_chars: 8000,
            max_concurrency: 4,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("chunk_chars", &self.chunk_chars)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

/// Builder for LlmConfig
#[derive(Debug, Default)]
pub struct LlmConfigBuilder {
    config: LlmConfig,
}

impl LlmConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
        }
    }

    /// Set the provider API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the request quota per minute
    pub fn requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.config.requests_per_minute = requests_per_minute;
        self
    }

    /// Set the maximum characters per chunk
    pub fn chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.config.chunk_chars = chunk_chars;
        self
    }

    /// Set the maximum number of chunk calls in flight
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Build the configuration
    pub fn build(self) -> LlmConfig {
        self.config
    }
}

impl LlmConfig {
    /// Create a new builder
    pub fn builder() -> LlmConfigBuilder {
        LlmConfigBuilder::new()
    }

    /// The API key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_low_temperature_gemini() {
        let config = LlmConfig::default();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, 0.2);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = LlmConfig::builder().api_key("   ").build();

        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LlmConfig::builder().api_key("secret-key").build();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = LlmConfig::builder().api_key("secret-key").build();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
