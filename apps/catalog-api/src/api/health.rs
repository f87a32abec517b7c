//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

/// Acquire the shared store connection and `ping` it.
async fn check_store(state: &AppState) -> Result<(), String> {
    let handle = state
        .connections
        .acquire()
        .await
        .map_err(|e| e.to_string())?;

    let status = check_health_detailed(handle.database()).await;
    if status.healthy {
        Ok(())
    } else {
        Err(status
            .message
            .unwrap_or_else(|| "store ping failed".to_string()))
    }
}

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![("store", Box::pin(check_store(&state)))];

    match run_health_checks(checks).await {
        Ok(response) | Err(response) => response,
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
