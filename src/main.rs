//! # webcrawl CLI Application
//!
//! Command-line entry point for the webcrawl tools.
//!
//! ## Subcommands
//!
//! - `web`: HTML form for running the tools from a browser
//! - `mcp`: MCP server over SSE or stdio
//! - `scrape`, `query`, `smart`: run one tool and print its text to stdout
//!
//! Configuration comes from an optional JSON file (`--config`), then the
//! `GOOGLE_API_KEY`/`GEMINI_API_KEY` environment variables, then flags.

mod logging;
mod telemetry;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use telemetry::OtelGuard;
use tracing::{info, instrument};
use webcrawl::config::{Config, McpTransport};
use webcrawl::tools::{ToolRequest, Toolbox};

#[derive(Parser)]
#[command(author, version, about = "Web page tools (scrape, keyword query, LLM extraction) for MCP clients and the browser", long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gemini API key, overriding GOOGLE_API_KEY and GEMINI_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTML form
    Web(WebArgs),
    /// Serve the tools over MCP
    Mcp(McpArgs),
    /// Fetch a page and print its markdown
    Scrape(ScrapeArgs),
    /// Print the text around each occurrence of a keyword in a page
    Query(QueryArgs),
    /// Extract data from a page with Gemini
    Smart(SmartArgs),
}

#[derive(Args, Debug)]
struct WebArgs {
    /// Listen address (default: 127.0.0.1:5000)
    #[arg(short, long)]
    addr: Option<SocketAddr>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransportArg {
    Sse,
    Stdio,
}

impl From<TransportArg> for McpTransport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Sse => McpTransport::Sse,
            TransportArg::Stdio => McpTransport::Stdio,
        }
    }
}

#[derive(Args, Debug)]
struct McpArgs {
    /// Transport to serve on (default: sse)
    #[arg(short, long, value_enum)]
    transport: Option<TransportArg>,

    /// Listen address for SSE (default: 127.0.0.1:8002)
    #[arg(short, long)]
    addr: Option<SocketAddr>,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// URL of the page
    #[arg(required = true)]
    url: String,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// URL of the page
    #[arg(required = true)]
    url: String,

    /// Keyword to search for
    #[arg(required = true)]
    keyword: String,

    /// Characters of context on each side of a match
    #[arg(short, long)]
    context: Option<usize>,

    /// Maximum number of matches to show (at least 1)
    #[arg(short, long)]
    max_matches: Option<NonZeroUsize>,
}

#[derive(Args, Debug)]
struct SmartArgs {
    /// URL of the page
    #[arg(required = true)]
    url: String,

    /// What to extract, in plain language
    #[arg(required = true)]
    instruction: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _ = Cli::parse_from(["webcrawl", "--help"]);
        return Ok(());
    };

    let mut config = Config::load(cli.config.as_deref())
        .await?
        .with_api_key(cli.api_key);

    if let Commands::Mcp(args) = &command {
        if let Some(transport) = args.transport {
            config.mcp.transport = transport.into();
        }
    }

    // stdout belongs to the protocol in stdio mode
    let log_file = match (&command, config.mcp.transport) {
        (Commands::Mcp(_), McpTransport::Stdio) => Some(logging::mcp_log_file()?),
        _ => None,
    };
    let _otel: Option<OtelGuard> = telemetry::init_tracing_subscriber(log_file)?;

    info!(
        "Gemini API key detected: {}",
        config.llm.api_key().is_some()
    );

    // Execute the appropriate command
    match command {
        Commands::Web(args) => web_command(config, args).await?,
        Commands::Mcp(args) => mcp_command(config, args).await?,
        Commands::Scrape(args) => {
            let toolbox = Toolbox::from_config(&config);
            run_tool(&toolbox, ToolRequest::Scrape { url: args.url }).await;
        }
        Commands::Query(args) => {
            if let Some(max_matches) = args.max_matches {
                config.query.max_matches = max_matches.get();
            }
            let toolbox = Toolbox::from_config(&config);
            let request = ToolRequest::Query {
                url: args.url,
                keyword: args.keyword,
                context_radius: args.context,
            };
            run_tool(&toolbox, request).await;
        }
        Commands::Smart(args) => {
            let toolbox = Toolbox::from_config(&config);
            let request = ToolRequest::Smart {
                url: args.url,
                instruction: args.instruction,
            };
            run_tool(&toolbox, request).await;
        }
    }

    Ok(())
}

#[instrument(skip(config))]
async fn web_command(mut config: Config, args: WebArgs) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.web.addr = addr;
    }

    let toolbox = Toolbox::from_config(&config);
    webcrawl::web::serve(toolbox, config.web.addr).await
}

#[instrument(skip(config))]
async fn mcp_command(mut config: Config, args: McpArgs) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.mcp.addr = addr;
    }

    let toolbox = Toolbox::from_config(&config);
    match config.mcp.transport {
        McpTransport::Sse => webcrawl::mcp::serve_sse(toolbox, config.mcp.addr).await,
        McpTransport::Stdio => webcrawl::mcp::serve_stdio(toolbox).await,
    }
}

#[instrument(skip(toolbox))]
async fn run_tool(toolbox: &Toolbox, request: ToolRequest) {
    let text = toolbox.run(request).await;
    println!("{}", text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_zero_max_matches() {
        let result = Cli::try_parse_from([
            "webcrawl",
            "query",
            "https://example.com",
            "rust",
            "--max-matches",
            "0",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_query_accepts_positive_max_matches() {
        let cli = Cli::try_parse_from([
            "webcrawl",
            "query",
            "https://example.com",
            "rust",
            "--max-matches",
            "2",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Query(args)) => {
                assert_eq!(args.max_matches.map(NonZeroUsize::get), Some(2));
            }
            other => panic!("expected query command, got {:?}", other),
        }
    }
}
