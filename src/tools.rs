//! The three web tools and their dispatch
//!
//! - `scrape`: fetch a page and return its markdown
//! - `query`: fetch a page and return context windows around a keyword
//! - `smart`: fetch a page and have an LLM extract what an instruction asks for
//!
//! Every tool returns text. Failures and informational outcomes are turned
//! into their message at the tool boundary, so callers never see an error.

mod error;

pub use error::ToolError;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::crawler::{PageFetcher, SpiderFetcher};
use crate::extraction::{Extraction, LlmExtractor, StructuredExtractor};
use crate::model::gemini_completion_model;
use crate::query::{find_context_snippets, ContextOptions};

/// Text returned when a caller names a tool that does not exist
pub const INVALID_TOOL_MESSAGE: &str = "Invalid tool selected.";

/// The kinds of tool on offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Scrape,
    Query,
    Smart,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Scrape, ToolKind::Query, ToolKind::Smart];

    /// Short name used by the web form
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Scrape => "scrape",
            ToolKind::Query => "query",
            ToolKind::Smart => "smart",
        }
    }

    /// Name the tool is registered under on the MCP server
    pub fn mcp_name(&self) -> &'static str {
        match self {
            ToolKind::Scrape => "scrape_url",
            ToolKind::Query => "extract_text_by_query",
            ToolKind::Smart => "smart_extract",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool name that matches no `ToolKind`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool '{0}'")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// A fully specified tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Scrape {
        url: String,
    },
    Query {
        url: String,
        keyword: String,
        /// Overrides the configured radius when set
        context_radius: Option<usize>,
    },
    Smart {
        url: String,
        instruction: String,
    },
}

impl ToolRequest {
    /// Build a request from loosely typed inputs, taking only the fields the
    /// tool needs
    pub fn new(kind: ToolKind, url: String, keyword: String, instruction: String) -> Self {
        match kind {
            ToolKind::Scrape => ToolRequest::Scrape { url },
            ToolKind::Query => ToolRequest::Query {
                url,
                keyword,
                context_radius: None,
            },
            ToolKind::Smart => ToolRequest::Smart { url, instruction },
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::Scrape { .. } => ToolKind::Scrape,
            ToolRequest::Query { .. } => ToolKind::Query,
            ToolRequest::Smart { .. } => ToolKind::Smart,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ToolRequest::Scrape { url }
            | ToolRequest::Query { url, .. }
            | ToolRequest::Smart { url, .. } => url,
        }
    }
}

/// Pretty-print `output` when it is JSON, otherwise return it unchanged
pub fn format_extracted(output: &str) -> String {
    serde_json::from_str::<serde_json::Value>(output)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| output.to_string())
}

/// Shared, immutable handle to the tools
#[derive(Clone)]
pub struct Toolbox {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Option<Arc<dyn LlmExtractor>>,
    query: ContextOptions,
}

impl Toolbox {
    /// Create a toolbox; without an extractor the smart tool reports a
    /// missing credential
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Option<Arc<dyn LlmExtractor>>,
        query: ContextOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            query,
        }
    }

    /// Wire the spider fetcher and, when an API key is configured, the
    /// rate-limited Gemini extractor
    pub fn from_config(config: &Config) -> Self {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(SpiderFetcher::new(config.crawler.clone()));

        let extractor = config.llm.api_key().map(|api_key| {
            info!(model = %config.llm.model, "Gemini selected as the extraction engine");
            let model = gemini_completion_model(
                api_key,
                &config.llm.model,
                config.llm.requests_per_minute,
            );
            Arc::new(StructuredExtractor::new(
                model,
                fetcher.clone(),
                config.llm.clone(),
            )) as Arc<dyn LlmExtractor>
        });

        Self::new(fetcher, extractor, config.query)
    }

    /// Run any tool request to its text result
    pub async fn run(&self, request: ToolRequest) -> String {
        match request {
            ToolRequest::Scrape { url } => self.scrape(&url).await,
            ToolRequest::Query {
                url,
                keyword,
                context_radius,
            } => self.query(&url, &keyword, context_radius).await,
            ToolRequest::Smart { url, instruction } => self.smart(&url, &instruction).await,
        }
    }

    /// Retrieve a page and return its markdown
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> String {
        render(ToolKind::Scrape, self.try_scrape(url).await)
    }

    /// Search a page for `keyword` and return the surrounding text
    #[instrument(skip(self))]
    pub async fn query(&self, url: &str, keyword: &str, context_radius: Option<usize>) -> String {
        render(
            ToolKind::Query,
            self.try_query(url, keyword, context_radius).await,
        )
    }

    /// Extract data from a page as directed by `instruction`
    #[instrument(skip(self))]
    pub async fn smart(&self, url: &str, instruction: &str) -> String {
        render(ToolKind::Smart, self.try_smart(url, instruction).await)
    }

    async fn try_scrape(&self, url: &str) -> Result<String, ToolError> {
        let page = self.fetcher.fetch(url).await.map_err(ToolError::Scrape)?;
        if page.is_empty() {
            return Err(ToolError::EmptyPage);
        }
        Ok(page.markdown)
    }

    async fn try_query(
        &self,
        url: &str,
        keyword: &str,
        context_radius: Option<usize>,
    ) -> Result<String, ToolError> {
        let options = match context_radius {
            Some(radius) => self.query.with_context_radius(radius),
            None => self.query,
        };

        let page = self
            .fetcher
            .fetch(url)
            .await
            .map_err(ToolError::QueryFetch)?;
        if page.is_empty() {
            return Err(ToolError::NoReadableContent {
                url: url.to_string(),
            });
        }

        let report = find_context_snippets(&page.markdown, keyword, options)?;
        info!(matches = report.summary_count(), "Keyword search finished");
        Ok(report.to_string())
    }

    async fn try_smart(&self, url: &str, instruction: &str) -> Result<String, ToolError> {
        let extractor = self
            .extractor
            .as_ref()
            .ok_or(ToolError::MissingCredential)?;

        match extractor.extract(url, instruction).await? {
            Extraction::Empty => Err(ToolError::NothingExtracted {
                instruction: instruction.to_string(),
            }),
            Extraction::Content(output) => Ok(format!(
                "LLM Extraction Successful:\n\n{}",
                format_extracted(&output)
            )),
        }
    }
}

fn render(kind: ToolKind, result: Result<String, ToolError>) -> String {
    match result {
        Ok(text) => text,
        Err(outcome) if outcome.is_failure() => {
            warn!(tool = %kind, error = %outcome, "Tool failed");
            outcome.to_string()
        }
        Err(outcome) => {
            info!(tool = %kind, outcome = %outcome, "Tool finished without a result");
            outcome.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::testing::StubFetcher;
    use crate::extraction::{ExtractionError, LlmConfig};
    use crate::model::mock_model::MockCompletionModel;
    use futures::future::BoxFuture;

    const URL: &str = "https://example.com/";

    /// Extractor that always returns the same outcome
    struct FixedExtractor(fn() -> Result<Extraction, ExtractionError>);

    impl LlmExtractor for FixedExtractor {
        fn extract<'a>(
            &'a self,
            _url: &'a str,
            _instruction: &'a str,
        ) -> BoxFuture<'a, Result<Extraction, ExtractionError>> {
            let result = (self.0)();
            Box::pin(async move { result })
        }
    }

    fn toolbox(fetcher: StubFetcher) -> Toolbox {
        Toolbox::new(Arc::new(fetcher), None, ContextOptions::default())
    }

    fn toolbox_with_extractor(extractor: FixedExtractor) -> Toolbox {
        Toolbox::new(
            Arc::new(StubFetcher::new()),
            Some(Arc::new(extractor)),
            ContextOptions::default(),
        )
    }

    #[test]
    fn test_tool_kind_parsing() {
        assert_eq!("scrape".parse::<ToolKind>(), Ok(ToolKind::Scrape));
        assert_eq!("query".parse::<ToolKind>(), Ok(ToolKind::Query));
        assert_eq!("smart".parse::<ToolKind>(), Ok(ToolKind::Smart));
        assert_eq!(
            "smart_extract".parse::<ToolKind>(),
            Err(UnknownTool("smart_extract".to_string()))
        );
        assert_eq!(
            "crawl".parse::<ToolKind>(),
            Err(UnknownTool("crawl".to_string()))
        );
    }

    #[test]
    fn test_request_keeps_only_needed_fields() {
        let request = ToolRequest::new(
            ToolKind::Smart,
            URL.to_string(),
            "ignored".to_string(),
            "list prices".to_string(),
        );

        assert_eq!(
            request,
            ToolRequest::Smart {
                url: URL.to_string(),
                instruction: "list prices".to_string()
            }
        );
        assert_eq!(request.kind(), ToolKind::Smart);
        assert_eq!(request.url(), URL);
    }

    #[test]
    fn test_format_extracted() {
        assert_eq!(format_extracted(r#"[{"a":1}]"#), "[\n  {\n    \"a\": 1\n  }\n]");
        assert_eq!(format_extracted("plain words"), "plain words");
    }

    #[tokio::test]
    async fn test_scrape_returns_markdown() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "# Welcome\n\nHello."));

        assert_eq!(toolbox.scrape(URL).await, "# Welcome\n\nHello.");
    }

    #[tokio::test]
    async fn test_scrape_empty_page() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, ""));

        assert_eq!(toolbox.scrape(URL).await, "No content retrieved.");
    }

    #[tokio::test]
    async fn test_whitespace_page_is_content() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, " \n"));

        assert_eq!(toolbox.scrape(URL).await, " \n");
        assert_eq!(
            toolbox.query(URL, "ferris", None).await,
            "No instances of 'ferris' were found."
        );
    }

    #[tokio::test]
    async fn test_scrape_failure_is_a_message() {
        let toolbox = toolbox(StubFetcher::new());

        let text = toolbox.scrape("ftp://example.com").await;
        assert_eq!(
            text,
            "[ERROR] Failed to scrape: unsupported URL scheme 'ftp', expected http or https"
        );
    }

    #[tokio::test]
    async fn test_query_finds_snippets() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "Rust is fast. RUST is safe."));

        let text = toolbox.query(URL, "rust", Some(3)).await;
        assert_eq!(
            text,
            "Found 2 relevant match(es):\n\nMatch 1:\nRust is\n\n---\n\nMatch 2:\nt. RUST is"
        );
    }

    #[tokio::test]
    async fn test_query_no_matches() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "Nothing to see"));

        assert_eq!(
            toolbox.query(URL, "ferris", None).await,
            "No instances of 'ferris' were found."
        );
    }

    #[tokio::test]
    async fn test_query_empty_page() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, ""));

        assert_eq!(
            toolbox.query(URL, "ferris", None).await,
            "No readable content found on: https://example.com/"
        );
    }

    #[tokio::test]
    async fn test_query_empty_keyword() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "content"));

        assert_eq!(
            toolbox.query(URL, "", None).await,
            "[ERROR] Problem during query search: keyword must not be empty"
        );
    }

    #[tokio::test]
    async fn test_query_fetch_failure() {
        let toolbox = toolbox(StubFetcher::new());

        assert_eq!(
            toolbox.query(URL, "rust", None).await,
            "[ERROR] Problem during query search: no response received from https://example.com/"
        );
    }

    #[tokio::test]
    async fn test_smart_without_credential() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "content"));

        assert_eq!(
            toolbox.smart(URL, "list prices").await,
            "Missing Gemini API key. Please define GOOGLE_API_KEY or GEMINI_API_KEY."
        );
    }

    #[tokio::test]
    async fn test_smart_pretty_prints_json() {
        let toolbox = toolbox_with_extractor(FixedExtractor(|| {
            Ok(Extraction::Content(r#"[{"price":5}]"#.to_string()))
        }));

        assert_eq!(
            toolbox.smart(URL, "prices").await,
            "LLM Extraction Successful:\n\n[\n  {\n    \"price\": 5\n  }\n]"
        );
    }

    #[tokio::test]
    async fn test_smart_keeps_plain_text() {
        let toolbox = toolbox_with_extractor(FixedExtractor(|| {
            Ok(Extraction::Content("Three prices.".to_string()))
        }));

        assert_eq!(
            toolbox.smart(URL, "prices").await,
            "LLM Extraction Successful:\n\nThree prices."
        );
    }

    #[tokio::test]
    async fn test_smart_nothing_extracted() {
        let toolbox = toolbox_with_extractor(FixedExtractor(|| Ok(Extraction::Empty)));

        assert_eq!(
            toolbox.smart(URL, "prices").await,
            "No data extracted using instruction: 'prices'"
        );
    }

    #[tokio::test]
    async fn test_smart_failure() {
        let toolbox = toolbox_with_extractor(FixedExtractor(|| {
            Err(ExtractionError::Other("model unavailable".to_string()))
        }));

        assert_eq!(
            toolbox.smart(URL, "prices").await,
            "[ERROR] Smart extract failed: model unavailable"
        );
    }

    #[tokio::test]
    async fn test_smart_end_to_end_with_mock_model() {
        let fetcher: Arc<dyn PageFetcher> =
            Arc::new(StubFetcher::new().with_page(URL, "Widget: $5"));
        let model = MockCompletionModel::new();
        model
            .set_text_response(r#"<blocks>[{"item": "Widget"}]</blocks>"#)
            .await;
        let extractor = StructuredExtractor::new(model, fetcher.clone(), LlmConfig::default());
        let toolbox = Toolbox::new(fetcher, Some(Arc::new(extractor)), ContextOptions::default());

        let text = toolbox
            .run(ToolRequest::Smart {
                url: URL.to_string(),
                instruction: "items".to_string(),
            })
            .await;

        assert_eq!(
            text,
            "LLM Extraction Successful:\n\n[\n  {\n    \"item\": \"Widget\"\n  }\n]"
        );
    }

    #[tokio::test]
    async fn test_run_dispatches_every_kind() {
        let toolbox = toolbox(StubFetcher::new().with_page(URL, "alpha beta"));

        for kind in ToolKind::ALL {
            let request = ToolRequest::new(
                kind,
                URL.to_string(),
                "beta".to_string(),
                "anything".to_string(),
            );
            let text = toolbox.run(request).await;
            match kind {
                ToolKind::Scrape => assert_eq!(text, "alpha beta"),
                ToolKind::Query => assert!(text.starts_with("Found 1 relevant match(es)")),
                ToolKind::Smart => assert!(text.starts_with("Missing Gemini API key")),
            }
        }
    }
}
