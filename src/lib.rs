//! # webcrawl - Web Page Tools for LLM Clients
//!
//! This crate fetches a single web page, renders it to markdown, and offers
//! three tools over it. The tools are served to MCP clients and through a
//! small HTML form.
//!
//! ## Features
//!
//! - `scrape`: a page's markdown
//! - `query`: case-insensitive keyword search with character-bounded context windows
//! - `smart`: Gemini-driven extraction guided by a natural-language instruction
//! - Rate-limited completion calls with chunked page content
//! - MCP over SSE or stdio, and an axum web form
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use webcrawl::config::Config;
//! use webcrawl::tools::{ToolRequest, Toolbox};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let toolbox = Toolbox::from_config(&config);
//!
//!     let text = toolbox
//!         .run(ToolRequest::Query {
//!             url: "https://www.rust-lang.org/".to_string(),
//!             keyword: "reliable".to_string(),
//!             context_radius: Some(80),
//!         })
//!         .await;
//!
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! The keyword search also works on text you already have:
//!
//! ```rust
//! use webcrawl::query::{find_context_snippets, ContextOptions};
//!
//! let report = find_context_snippets("Hello World", "hello", ContextOptions::new(5, 5)).unwrap();
//! assert_eq!(report.to_string(), "Found 1 relevant match(es):\n\nMatch 1:\nHello Worl");
//! ```

mod error;

pub mod config;
pub mod crawler;
pub mod extraction;
pub mod mcp;
pub mod model;
pub mod query;
pub mod tools;
pub mod web;

pub use error::{Error, Result};
