//! MCP server exposing the web tools

use std::future::Future;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ErrorData as McpError, *},
    schemars::JsonSchema,
    tool, tool_handler, tool_router,
};
use serde::Deserialize;
use tracing::info;

use crate::tools::{ToolKind, Toolbox};

/// Webcrawl MCP server - each tool fetches one page and answers in text
#[derive(Clone)]
pub struct WebcrawlServer {
    toolbox: Toolbox,
    tool_router: ToolRouter<WebcrawlServer>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScrapeParams {
    #[schemars(description = "Absolute http or https URL of the page to fetch")]
    pub target_url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryParams {
    #[schemars(description = "Absolute http or https URL of the page to search")]
    pub target_url: String,
    #[schemars(description = "Non-empty term to look for, matched case-insensitively")]
    pub keyword: String,
    /// Characters of context on each side of a match
    #[schemars(description = "Characters of context kept on each side of a match (default: 300)")]
    pub context: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SmartParams {
    #[schemars(description = "Absolute http or https URL of the page to extract from")]
    pub target_url: String,
    #[schemars(description = "Natural-language description of the data to extract")]
    pub instruction: String,
}

#[tool_router]
impl WebcrawlServer {
    pub fn new(toolbox: Toolbox) -> Self {
        Self {
            toolbox,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Retrieve a webpage's content and return its markdown representation.")]
    async fn scrape_url(
        &self,
        Parameters(params): Parameters<ScrapeParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = ToolKind::Scrape.mcp_name(), url = %params.target_url, "Tool call");
        let text = self.toolbox.scrape(&params.target_url).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Search a webpage for a specific query and return relevant segments of text."
    )]
    async fn extract_text_by_query(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = ToolKind::Query.mcp_name(), url = %params.target_url, "Tool call");
        let text = self
            .toolbox
            .query(&params.target_url, &params.keyword, params.context)
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Use an LLM-powered extractor to pull structured data based on natural instructions."
    )]
    async fn smart_extract(
        &self,
        Parameters(params): Parameters<SmartParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = ToolKind::Smart.mcp_name(), url = %params.target_url, "Tool call");
        let text = self
            .toolbox
            .smart(&params.target_url, &params.instruction)
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for WebcrawlServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "webcrawl".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            instructions: Some(
                "Web page tools. scrape_url returns a page as markdown. \
                 extract_text_by_query returns text around each occurrence of a keyword. \
                 smart_extract uses Gemini to pull out the data an instruction describes."
                    .into(),
            ),
        }
    }
}
