//! API error type and its HTTP mapping.
//!
//! [`ApiError`] implements `IntoResponse`. Validation failures render as a
//! bare field map; every other error renders as `{"detail": "..."}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;
use crate::validation::ValidationErrors;

pub const NOT_FOUND_DETAIL: &str = "No Todo matches the given query.";
const INTERNAL_DETAIL: &str = "A server error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown or malformed todo id (404).
    #[error("not found")]
    NotFound,

    /// Field-level validation failure (400).
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Body could not be read as JSON (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Body was not sent as JSON (415).
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Anything else (500). The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => detail(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::BadRequest(msg) => detail(StatusCode::BAD_REQUEST, &msg),
            ApiError::UnsupportedMediaType(msg) => {
                detail(StatusCode::UNSUPPORTED_MEDIA_TYPE, &msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                detail(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL)
            }
        }
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Validation(errors) => ApiError::Validation(errors),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(r) => {
                ApiError::UnsupportedMediaType(r.body_text())
            }
            other => ApiError::BadRequest(format!("JSON parse error - {}", other.body_text())),
        }
    }
}
