//! Unified error types for the items service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Unified error type for the items service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// MongoDB driver error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Error returned from HTTP handlers.
///
/// Every failure that reaches the HTTP boundary is unexpected, so the client
/// only ever sees a generic `500`; the cause goes to the log.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

/// Body of a `500` response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Fixed, non-revealing message.
    pub error: &'static str,
}

impl<E> From<E> for ApiError
where
    E: Into<ServiceError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "internal server error",
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_renders_generic_500() {
        let err = ApiError::from(ServiceError::InvalidConfig("boom".to_string()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn io_error_converts_into_service_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: ServiceError = io.into();

        assert!(err.to_string().starts_with("io error"));
    }
}
