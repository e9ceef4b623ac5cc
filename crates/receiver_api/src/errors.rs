//! Error handling and HTTP error conversion
//!
//! Core errors are translated to HTTP responses here, at the boundary.
//! Authentication failures become 401 with the core's short message so the
//! sender can tell a bad signature from a stale timestamp; anything else is
//! a 500 whose details stay in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use receiver_core::AuthenticationError;
use thiserror::Error;

use crate::models::response::WebhookResponse;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors returned from handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Delivery failed signature or freshness checks
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Unexpected server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    fn public_message(&self) -> String {
        match self {
            ApiError::Authentication(err) => err.to_string(),
            ApiError::Internal(_) => "internal error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log error server-side
        log_error(&self, status);

        (status, Json(WebhookResponse::error(self.public_message()))).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!("API error: {} - {}", status, error);
        }
        StatusCode::UNAUTHORIZED => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, error);
        }
    }
}
