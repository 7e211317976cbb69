use std::env;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Open `.webcrawl/mcp.log` in the working directory for appending
///
/// Used when stdout carries the MCP stdio protocol.
pub fn mcp_log_file() -> anyhow::Result<RollingFileAppender> {
    let log_dir = env::current_dir()?.join(".webcrawl");
    std::fs::create_dir_all(&log_dir)?;

    Ok(RollingFileAppender::new(Rotation::NEVER, log_dir, "mcp.log"))
}
