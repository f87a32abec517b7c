use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::ErrorEnvelope;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    ErrorEnvelope::new(StatusCode::NOT_FOUND, "Route not found").into_response()
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed() -> Response {
    ErrorEnvelope::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
}

/// Middleware giving the bodiless `408` of the timeout layer an error envelope.
///
/// Must sit outside the `TimeoutLayer`.
pub async fn timeout_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return ErrorEnvelope::new(StatusCode::REQUEST_TIMEOUT, "Request timed out")
            .into_response();
    }

    response
}
