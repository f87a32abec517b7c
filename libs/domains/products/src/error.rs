use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::ConnectionError;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ProductError {
    pub fn not_found() -> Self {
        ProductError::NotFound(PRODUCT_NOT_FOUND.to_string())
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Connection(msg) => AppError::InternalServerError(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<ConnectionError> for ProductError {
    fn from(err: ConnectionError) -> Self {
        ProductError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::not_found(), StatusCode::NOT_FOUND),
            (ProductError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ProductError::Connection("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ProductError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ProductError::not_found().to_string(), "Product not found");
    }

    #[test]
    fn test_connection_error_conversion() {
        let err: ProductError = ConnectionError::Unreachable("refused".into()).into();
        assert!(matches!(err, ProductError::Connection(_)));
    }
}
