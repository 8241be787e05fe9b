//! Seatwise server entry point.

use seatwise_db::{DbConfig, DbManager};
use seatwise_server::{ApiConfig, run_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seatwise=info")),
        )
        .json()
        .init();

    tracing::info!("Starting Seatwise server...");

    let db_config = DbConfig::from_env();
    let manager = DbManager::connect(&db_config).await?;

    let api_config = ApiConfig::from_env();
    run_server(api_config, manager.client().clone()).await?;

    tracing::info!("Seatwise server stopped.");

    Ok(())
}
