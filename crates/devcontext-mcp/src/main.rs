use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use devcontext_core::{resolve_base_dir, Config, FsStore, PatternRepository};
use devcontext_mcp::DevContextServer;

#[derive(Parser)]
#[command(name = "devcontext-mcp")]
#[command(about = "MCP server for categorized context patterns")]
#[command(version)]
struct Cli {
    /// Base directory holding config.toml (default: ~/.devcontext)
    #[arg(long, env = "DEVCONTEXT_BASE")]
    base_dir: Option<PathBuf>,

    /// Patterns directory (overrides store.root)
    #[arg(long, env = "DEVCONTEXT_ROOT")]
    root: Option<PathBuf>,

    /// URI scheme for resources (overrides store.scheme)
    #[arg(long)]
    scheme: Option<String>,
}

fn init_tracing() {
    // stdout carries the protocol; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let base_dir = resolve_base_dir(cli.base_dir);
    let config = Config::load(&base_dir)
        .with_context(|| format!("loading config from {}", base_dir.display()))?;

    let root = cli
        .root
        .unwrap_or_else(|| config.patterns_root(&base_dir));
    let scheme = cli.scheme.unwrap_or_else(|| config.store.scheme.clone());

    if !root.is_dir() {
        warn!(root = %root.display(), "patterns directory does not exist; serving an empty store");
    }
    info!(root = %root.display(), scheme = %scheme, "starting devcontext MCP server");

    let repo = PatternRepository::new(FsStore::new(root))
        .with_scheme(&scheme)
        .with_templates(config.templates.clone());
    let server = DevContextServer::new(repo);

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}
