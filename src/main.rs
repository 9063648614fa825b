use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dataset_api::config::AppConfig;
use dataset_api::database::DatabaseManager;
use dataset_api::{app, AppState};

#[derive(Parser, Debug)]
#[command(name = "dataset-api")]
#[command(about = "REST API for datasets")]
#[command(version)]
struct Args {
    /// Interface to bind (overrides DATASETS_API_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides DATASETS_API_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Apply migrations and exit
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("Invalid configuration: {}", msg))?;

    tracing::info!("Starting Dataset API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to apply migrations")?;

    if args.migrate {
        tracing::info!("Migrations applied");
        db.close().await;
        return Ok(());
    }

    let bind_addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Dataset API listening on http://{}", listener.local_addr()?);

    let state = AppState::new(config, db.clone());
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
