use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use pm_radar::app::{router, AppState};
use pm_radar::config::AppConfig;
use pm_radar::db::memory::InMemoryStore;
use pm_radar::demo_seeder::seed_demo_data;

/// AI news and PM resource directory server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file (defaults to ./pm-radar.toml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address, e.g. 0.0.0.0:5000.
    #[arg(long)]
    bind: Option<String>,

    /// Start with empty collections.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pm_radar=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting pm-radar server...");

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if cli.no_seed {
        config.seed_demo_data = false;
    }

    let store = Arc::new(InMemoryStore::new());
    if config.seed_demo_data {
        seed_demo_data(store.as_ref(), store.as_ref()).await?;
    }

    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving client files from {}", dir.display());
    }

    let app = router(AppState::from_store(store), &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
