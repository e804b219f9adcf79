//! Error types and their HTTP mapping.
//!
//! `StoreError` is what the store reports. `ApiError` is what handlers
//! return; it also carries body-decoding rejections so every failure leaves
//! the server as a JSON `{"error": ...}` object.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was absent or empty.
    #[error("title is required")]
    Validation,

    /// No todo has the requested id.
    #[error("not found")]
    NotFound,
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::Validation => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Errors returned from request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body could not be decoded as the expected JSON.
    #[error(transparent)]
    Json(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => err.status(),
            ApiError::Json(rejection) => rejection.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(err) => err.to_string(),
            ApiError::Json(rejection) => rejection.body_text(),
        };
        tracing::debug!(status = %status, error = %message, "request failed");
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// Invalid values in the process environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_carry_the_public_messages() {
        assert_eq!(StoreError::Validation.to_string(), "title is required");
        assert_eq!(StoreError::NotFound.to_string(), "not found");
    }

    #[test]
    fn store_errors_map_to_statuses() {
        assert_eq!(StoreError::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(StoreError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(StoreError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn config_error_wraps_extraction_failure() {
        let err = ConfigError::from(figment::Error::from("bad port".to_string()));
        assert!(err.to_string().starts_with("invalid configuration: "));
        assert!(err.to_string().contains("bad port"));
    }
}
