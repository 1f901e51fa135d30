//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers branch
//! on them: the first means the id is gone, the second carries the server's
//! per-field messages. Every other unexpected status lands in `HttpError`
//! with the raw status code and body for debugging.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. The requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with field-level messages.
    #[error("validation failed: {errors:?}")]
    Validation { errors: BTreeMap<String, Vec<String>> },

    /// The server returned an unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
