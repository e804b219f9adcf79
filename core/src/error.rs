//! Error types for the todo API client.
//!
//! `NotFound` and `Validation` get dedicated variants because those are the
//! two outcomes the server reports on purpose. Any other non-success response
//! lands in `HttpError` with the raw status code and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with an `{"error": ...}` body.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
