//! Model Context Protocol (MCP) server
//!
//! Serves the three web tools to MCP clients, either over Server-Sent Events
//! (the default) or over standard input and output. Tool failures are
//! reported as ordinary text results, never as protocol errors.

mod server;

pub use server::{QueryParams, ScrapeParams, SmartParams, WebcrawlServer};

use std::net::SocketAddr;

use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServer;
use tracing::{info, instrument};

use crate::tools::Toolbox;

/// Serve the tools over SSE until Ctrl-C
///
/// # Arguments
///
/// * `toolbox` - Tools shared by every client session
/// * `addr` - Address to listen on
#[instrument(skip(toolbox))]
pub async fn serve_sse(toolbox: Toolbox, addr: SocketAddr) -> anyhow::Result<()> {
    let server = WebcrawlServer::new(toolbox);

    info!("Starting webcrawl MCP server on http://{}/sse", addr);
    let ct = SseServer::serve(addr)
        .await?
        .with_service(move || server.clone());

    tokio::signal::ctrl_c().await?;
    info!("Shutting down MCP server");
    ct.cancel();

    Ok(())
}

/// Serve the tools over stdin and stdout until the client disconnects
#[instrument(skip(toolbox))]
pub async fn serve_stdio(toolbox: Toolbox) -> anyhow::Result<()> {
    info!("Starting webcrawl MCP server on stdio");
    let running_server = WebcrawlServer::new(toolbox)
        .serve(rmcp::transport::stdio())
        .await?;

    running_server.waiting().await?;

    Ok(())
}
