//! HTTP request handlers
//!
//! Handlers translate HTTP requests to core calls and core results to HTTP
//! responses. They hold no logic of their own beyond logging and metrics.

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use receiver_core::replay::now_millis;
use tracing::info;

use crate::{
    errors::ApiError,
    metrics::WebhookOutcome,
    models::{request::WebhookHeaders, response::*},
    AppState,
};

/// POST /webhook
///
/// Authenticates a WARest delivery and returns the reply actions for it.
///
/// Returns 401 with `{ "ok": false, "error": ... }` when the signature or,
/// if enforced, the timestamp is rejected. Dispatch never runs in that case.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: WebhookHeaders,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    info!(
        event = headers.event.as_deref().unwrap_or("(none)"),
        session = headers.session.as_deref().unwrap_or("(none)"),
        username = headers.username.as_deref().unwrap_or("(none)"),
        event_id = headers.event_id.as_deref().unwrap_or("(none)"),
        version = headers.version.as_deref().unwrap_or("(none)"),
        body_bytes = body.len(),
        "Webhook received"
    );

    let result = receiver_core::process(&state.receiver, &headers.as_inbound(&body), now_millis());
    state.metrics.record(WebhookOutcome::from(&result));

    Ok(Json(WebhookResponse::from(result?)))
}

/// GET /health
///
/// Health check endpoint.
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /metrics
///
/// Prometheus text exposition of delivery metrics.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
