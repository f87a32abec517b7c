//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! ## Modules
//!
//! - **[`envelope`]**: `{success, data}` response envelopes
//! - **[`errors`]**: [`AppError`] and the `{success: false, error, statusCode}` error envelope
//! - **[`extractors`]**: JSON body and query extractors that reject with the error envelope
//! - **[`http`]**: CORS and `server-timing` middleware
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let api_routes = Router::new(); // Mounted under /api
//!     let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()), &config)?;
//!
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::{ApiResponse, Created, Message, PaginatedResponse};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks,
};

pub use http::{cors_layer, server_timing};

pub use errors::{AppError, ErrorEnvelope};

pub use extractors::{ValidatedJson, ValidatedQuery};
