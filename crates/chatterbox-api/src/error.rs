//! API error types and JSON error response formatting.
//!
//! ApiError provides a consistent JSON error response format across all
//! endpoints, mapping internal errors to appropriate HTTP status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use chatterbox_chat::ChatError;
use chatterbox_core::error::ChatterboxError;
use chatterbox_hangman::HangmanError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 404 Not Found - resource does not exist.
    NotFound(String),
    /// 409 Conflict - the request does not fit the resource's state.
    Conflict(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatterboxError> for ApiError {
    fn from(err: ChatterboxError) -> Self {
        error!(error = %err, "Request failed");
        match err {
            ChatterboxError::Config(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyQuestion => ApiError::BadRequest(err.to_string()),
            other => {
                error!(error = %other, "Chat request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<HangmanError> for ApiError {
    fn from(err: HangmanError) -> Self {
        match err {
            HangmanError::InvalidLetter(_) => ApiError::BadRequest(err.to_string()),
            HangmanError::GameOver { .. } => ApiError::Conflict(err.to_string()),
            other => {
                error!(error = %other, "Hangman request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Malformed or incomplete JSON bodies become structured 400s.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
