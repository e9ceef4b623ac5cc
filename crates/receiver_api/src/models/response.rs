//! HTTP response models
//!
//! Every webhook response carries `ok`. Successful deliveries add either
//! `actions` + `delayMs` or `pong: true`; rejected deliveries add `error`.
//!
//! # Example
//!
//! ```json
//! {
//!   "ok": true,
//!   "actions": [{ "type": "text", "to": "123@s.whatsapp.net", "text": "pong" }],
//!   "delayMs": 600
//! }
//! ```

use receiver_core::{Action, DispatchOutcome};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Body returned from POST /webhook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    /// Whether the delivery was accepted
    pub ok: bool,

    /// Actions for the sender to perform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,

    /// Suggested delay between actions, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Set for preflight deliveries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pong: Option<bool>,

    /// Failure reason for rejected deliveries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    /// Response for a rejected delivery.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            actions: None,
            delay_ms: None,
            pong: None,
            error: Some(message.into()),
        }
    }
}

impl From<DispatchOutcome> for WebhookResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Pong => Self {
                ok: true,
                actions: None,
                delay_ms: None,
                pong: Some(true),
                error: None,
            },
            DispatchOutcome::Actions { actions, delay_ms } => Self {
                ok: true,
                actions: Some(actions),
                delay_ms: Some(delay_ms),
                pong: None,
                error: None,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
