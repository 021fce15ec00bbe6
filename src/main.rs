use std::path::PathBuf;

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use scope_status_mcp::config::DisplayConfig;
use scope_status_mcp::server::ScopeStatusServer;

#[derive(Parser, Debug)]
#[command(
    name = "scope-status-mcp",
    about = "MCP server resolving the enclosing class/function for editor cursors"
)]
struct Args {
    /// Path to the display-config JSON file (missing file means defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing to stderr (stdout is used for MCP stdio transport)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DisplayConfig::load(path)?,
        None => DisplayConfig::default(),
    };

    tracing::info!("Starting scope-status-mcp server");

    let server = ScopeStatusServer::new(config, args.config);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    Ok(())
}
