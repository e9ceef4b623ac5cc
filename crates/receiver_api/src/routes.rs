//! HTTP routing configuration
//!
//! # Route Structure
//!
//! - POST   /webhook - Receive a WARest delivery
//! - GET    /health  - Health check
//! - GET    /metrics - Prometheus metrics

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    // Headers are left out of spans: they carry signatures.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(false))
        .on_response(DefaultOnResponse::new().include_headers(false));

    let timeout_layer = TimeoutLayer::new(state.request_timeout);

    Router::new()
        .route("/webhook", post(handlers::receive_webhook))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .with_state(state)
}
