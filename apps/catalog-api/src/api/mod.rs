//! API routes module

pub mod health;
pub mod home;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes mounted under `/api`
pub fn api_routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Routes mounted at the root: welcome page and health checks
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(home::router())
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}

/// Full application router with docs, middleware and fallback
pub fn router(state: &AppState) -> io::Result<Router> {
    create_router::<ApiDoc>(api_routes(state), root_routes(state), &state.config.server)
}

/// Initialize store indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{Config, Environment};
    use core_config::{app_info, server::ServerConfig};
    use database::{
        ConnectionManager, RetryConfig,
        mongodb::{MongoConnector, StoreConfig},
    };
    use std::sync::Arc;

    pub const UNREACHABLE_URL: &str = "mongodb://127.0.0.1:1/?directConnection=true";

    pub fn state_for(store: StoreConfig, retry: Option<RetryConfig>) -> AppState {
        let connector = match retry {
            Some(retry) => MongoConnector::new(store.clone()).with_retry(retry),
            None => MongoConnector::new(store.clone()),
        };

        AppState {
            config: Config {
                app: app_info!(),
                store,
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            connections: Arc::new(ConnectionManager::new(connector)),
        }
    }

    /// State whose store is unreachable and gives up quickly
    pub fn unreachable_state() -> AppState {
        let mut store = StoreConfig::new(UNREACHABLE_URL, "catalog");
        store.connect_timeout_secs = 1;
        store.server_selection_timeout_secs = 1;
        state_for(store, None)
    }
}
