//! Catalog API - product catalog REST server

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{ConnectionManager, RetryConfig, mongodb::MongoConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        "Using store database {} at {}",
        config.store.database(),
        config.store.url()
    );

    // The connection is opened lazily by the first request that needs it
    let connector = MongoConnector::new(config.store.clone()).with_retry(RetryConfig::default());
    let connections = Arc::new(ConnectionManager::new(connector));

    let state = AppState {
        config: config.clone(),
        connections: connections.clone(),
    };

    // Warm the connection; a failure here is retried on the next request
    if let Err(e) = api::init_indexes(&state).await {
        warn!("Store not reachable at startup: {}", e);
    }

    let app = api::router(&state)?;

    info!("Starting Catalog API on port {}", config.server.port);

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing store connection");
        connections.release().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
