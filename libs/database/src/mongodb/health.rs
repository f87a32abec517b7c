use mongodb::{Database, bson::doc};
use std::time::Instant;

/// Result of a store health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// `ping` the catalog database, reporting latency and any error.
///
/// # Example
/// ```ignore
/// let status = check_health_detailed(handle.database()).await;
/// if !status.healthy {
///     tracing::warn!(message = ?status.message, "store unhealthy");
/// }
/// ```
pub async fn check_health_detailed(database: &Database) -> HealthStatus {
    let start = Instant::now();
    let result = database.run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
