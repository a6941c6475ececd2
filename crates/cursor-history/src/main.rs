use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cursor_history::{AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "cursor-history")]
#[command(about = "Read-only HTTP API over Cursor workspace storage")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "CURSOR_HISTORY_PORT", default_value = "3001")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "CURSOR_HISTORY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Cursor workspaceStorage directory (defaults to the OS location)
    #[arg(short, long, env = "WORKSPACE_PATH")]
    workspace_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, env = "CURSOR_HISTORY_VERBOSE")]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, env = "CURSOR_HISTORY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "cursor_history=debug,tower_http=debug"
    } else {
        "cursor_history=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(path) = cli.workspace_path.filter(|p| !p.is_empty()) {
        config.workspace_path = Some(path);
    }

    let state = AppState::new(config);
    let root = state.storage_root();
    if root.is_dir() {
        info!("Reading workspaces from: {}", root.display());
    } else {
        // Not fatal: Cursor may not have created it yet.
        warn!("Workspace directory does not exist: {}", root.display());
    }

    let app = cursor_history::app(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    info!("Starting cursor-history on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
