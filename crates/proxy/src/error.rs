//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//! Every error body is JSON: either `{"message": ...}` or the upstream body
//! passed through.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use vant_core::ApiMessage;

use crate::services::BackendError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// The route needs a backend and none is configured.
    #[error("{0}")]
    BackendUnavailable(String),

    /// The backend rejected a write; its status and body are passed through.
    #[error("Upstream error: {status}")]
    Upstream {
        status: u16,
        body: String,
        /// Message used when the body is not JSON.
        fallback: &'static str,
    },

    /// The backend could not be reached or sent garbage.
    #[error("Backend unreachable: {0}")]
    Unreachable(#[source] BackendError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convert a backend failure on a write route.
    ///
    /// Error responses keep their status and body; everything else is
    /// treated as unreachable.
    #[must_use]
    pub fn from_backend(err: BackendError, fallback: &'static str) -> Self {
        match err {
            BackendError::Api { status, body } => Self::Upstream { status, body, fallback },
            other => Self::Unreachable(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Unreachable(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::BadRequest(message) => message_response(StatusCode::BAD_REQUEST, message),
            Self::BackendUnavailable(message) => message_response(StatusCode::SERVICE_UNAVAILABLE, message),
            Self::Upstream { status, body, fallback } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                match serde_json::from_str::<serde_json::Value>(&body) {
                    Ok(json) => (status, Json(json)).into_response(),
                    Err(_) => message_response(status, fallback.to_string()),
                }
            }
            // Don't expose internal error details to clients
            Self::Unreachable(_) => message_response(StatusCode::BAD_GATEWAY, "Request failed".to_string()),
            Self::Internal(_) => {
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}

fn message_response(status: StatusCode, message: String) -> Response {
    (status, Json(ApiMessage::new(message))).into_response()
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
