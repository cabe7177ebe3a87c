// FinSec dashboard entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use finsec_config::ConfigManager;
use finsec_dashboard::DashboardServer;
use tracing_subscriber::EnvFilter;

/// FinSec fraud-screening dashboard
#[derive(Parser, Debug)]
#[command(name = "finsec-dashboard")]
#[command(about = "Upload CSV transactions, score them for fraud risk, download the results")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); FINSEC_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8501
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let mut config = manager.load_config().context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
        manager
            .validate_config(&config)
            .context("invalid --bind address")?;
    }

    let server = DashboardServer::new(config).context("failed to initialize dashboard")?;
    server.start().await.context("dashboard server stopped")?;
    Ok(())
}
