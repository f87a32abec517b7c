use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found, timeout_envelope};
use crate::http::{cors_layer, server_timing};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Requests still running after this are answered with a `408` envelope and
/// their handler future is dropped, which abandons any in-flight store call.
///
/// Store acquisition is bounded well below this, so a dead store yields the
/// handler's own error response first.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the application router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/api/docs` and the OpenAPI document at `/api/docs/json`
/// - `apis` nested under `/api`
/// - `routes` merged at the root (welcome page, health checks)
/// - Request tracing, `server-timing`, CORS, compression and a request timeout
/// - The `Route not found` and `Method not allowed` fallbacks
///
/// CORS follows `server_config.cors_allowed_origins`; see [`cors_layer`].
///
/// # Errors
/// Returns an error if the configured CORS origins are invalid.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/products", get(handler))
///     .with_state(state);
///
/// let router = create_router::<ApiDoc>(api_routes, Router::new(), &config)?;
/// ```
pub fn create_router<T>(apis: Router, routes: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(server_config.cors_allowed_origins.as_deref())?;

    let router = Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/json", T::openapi()))
        .nest("/api", apis)
        .merge(routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(middleware::from_fn(timeout_envelope))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(server_timing))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests are drained before `serve` returns. `cleanup` (closing
/// the store connection, for instance) is bounded by `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// let cleanup = async move {
///     connections.release().await;
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { shutdown_handle.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
