use clap::Parser;
use std::time::Duration;
use tracing::info;

mod config;
mod core;
mod error;
mod http;
mod utils;

use crate::config::Config;
use crate::core::data::Database;
use crate::core::services::EnrichmentClient;
use crate::error::Result;
use crate::http::AppState;

#[derive(Parser)]
#[command(name = "songshelf")]
#[command(about = "HTTP service for managing a song library with lyrics pagination")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Env file path (optional)
    #[arg(short, long)]
    env_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose).map_err(crate::error::SongshelfError::Internal)?;

    let config = Config::load(cli.env_file.as_deref())?;

    let db = Database::open(&config.database_path)?;
    let enrichment = EnrichmentClient::new(
        &config.external_api_url,
        Duration::from_secs(config.enrichment_timeout_seconds),
    );
    let state = AppState::new(db, enrichment);

    let app = http::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to create SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
