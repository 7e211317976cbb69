//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! the provider API key from the environment, then explicit overrides from the
//! command line. Every section is optional in the file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::crawler::CrawlerConfig;
use crate::error::{Error, Result};
use crate::extraction::LlmConfig;
use crate::query::ContextOptions;

/// Environment variables checked for the Gemini API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Settings for the web form server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address
    pub addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// MCP transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    /// Server-Sent Events over HTTP
    #[default]
    Sse,
    /// Standard input and output
    Stdio,
}

/// Settings for the MCP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Transport to serve on
    pub transport: McpTransport,

    /// Listen address for the SSE transport
    pub addr: SocketAddr,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            transport: McpTransport::Sse,
            addr: SocketAddr::from(([127, 0, 0, 1], 8002)),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub llm: LlmConfig,
    pub query: ContextOptions,
    pub web: WebConfig,
    pub mcp: McpConfig,
}

impl Config {
    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a JSON file
    pub async fn read_config(path: impl AsRef<Path>) -> Result<Self> {
        let config = tokio::fs::read_to_string(path).await?;
        Self::from_json(&config)
    }

    /// Load configuration from an optional file and the process environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::read_config(path).await?,
            None => Self::default(),
        };
        Ok(config.with_env(|name| std::env::var(name).ok()))
    }

    /// Take the API key from the first non-blank variable in `API_KEY_VARS`,
    /// keeping any key from the file when none is set
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        if from_env.is_some() {
            self.llm.api_key = from_env;
        }
        self
    }

    /// Override the API key; blank keys are ignored
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.llm.api_key = Some(api_key);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.query.max_matches == 0 {
            return Err(Error::Config(
                "query.max_matches must be at least 1".to_string(),
            ));
        }
        if self.llm.chunk_chars == 0 {
            return Err(Error::Config("llm.chunk_chars must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.web.addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.mcp.addr.to_string(), "127.0.0.1:8002");
        assert_eq!(config.mcp.transport, McpTransport::Sse);
        assert_eq!(config.query, ContextOptions::new(300, 5));
        assert_eq!(config.llm.temperature, 0.2);
        assert!(config.llm.api_key().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{"query": {"context_radius": 50}, "mcp": {"transport": "stdio"}}"#,
        )
        .unwrap();

        assert_eq!(config.query.context_radius, 50);
        assert_eq!(config.query.max_matches, 5);
        assert_eq!(config.mcp.transport, McpTransport::Stdio);
        assert_eq!(config.mcp.addr.to_string(), "127.0.0.1:8002");
        assert_eq!(config.crawler, CrawlerConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_json(r#"{"query": {"max_matches": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_env_key_precedence() {
        let config = Config::default().with_env(env(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GEMINI_API_KEY", "gemini-key"),
        ]));
        assert_eq!(config.llm.api_key(), Some("google-key"));

        let config = Config::default().with_env(env(&[
            ("GOOGLE_API_KEY", "  "),
            ("GEMINI_API_KEY", "gemini-key"),
        ]));
        assert_eq!(config.llm.api_key(), Some("gemini-key"));

        let config = Config::default().with_env(env(&[]));
        assert_eq!(config.llm.api_key(), None);
    }

    #[test]
    fn test_key_layers_file_then_env_then_flag() {
        let from_file = Config::from_json(r#"{"llm": {"api_key": "file-key"}}"#).unwrap();
        let config = from_file.clone().with_env(env(&[]));
        assert_eq!(config.llm.api_key(), Some("file-key"));

        let config = from_file.with_env(env(&[("GOOGLE_API_KEY", "env-key")]));
        assert_eq!(config.llm.api_key(), Some("env-key"));

        let config = config.with_api_key(Some("flag-key".to_string()));
        assert_eq!(config.llm.api_key(), Some("flag-key"));

        let config = config.with_api_key(Some(String::new()));
        assert_eq!(config.llm.api_key(), Some("flag-key"));
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = Config::default().with_api_key(Some("secret".to_string()));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[tokio::test]
    async fn test_read_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"web": {{"addr": "0.0.0.0:8080"}}}}"#).unwrap();

        let config = Config::read_config(file.path()).await.unwrap();

        assert_eq!(config.web.addr.to_string(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = Config::read_config("/nonexistent/webcrawl.json")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
