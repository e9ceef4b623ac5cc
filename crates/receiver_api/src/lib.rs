//! WARest webhook receiver HTTP API
//!
//! This crate is the HTTP boundary around `receiver_core`. It exposes:
//!
//! - POST /webhook - authenticated webhook deliveries
//! - GET  /health  - liveness check
//! - GET  /metrics - Prometheus metrics
//!
//! # Architecture
//!
//! This crate handles:
//! - Header and body extraction
//! - Mapping authentication failures to HTTP 401
//! - JSON rendering of dispatch results
//! - Environment configuration, routing and server startup
//!
//! Business logic lives in `receiver_core`; the dependency flows
//! HTTP API → core, never the reverse.

use std::{sync::Arc, time::Duration};

use receiver_core::ReceiverConfig;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use errors::ApiError;
pub use metrics::{NoOpWebhookMetrics, PrometheusWebhookMetrics, WebhookMetrics};
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state shared across handlers
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Secrets and freshness policy used to authenticate deliveries
    pub receiver: Arc<ReceiverConfig>,

    /// Delivery outcome metrics
    pub metrics: Arc<dyn WebhookMetrics>,

    /// Per-request timeout applied by the router
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new application state
    ///
    /// # Arguments
    ///
    /// * `receiver` - Receiver configuration loaded at startup
    /// * `metrics` - Metrics sink for delivery outcomes
    pub fn new(receiver: ReceiverConfig, metrics: Arc<dyn WebhookMetrics>) -> Self {
        Self {
            receiver: Arc::new(receiver),
            metrics,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
