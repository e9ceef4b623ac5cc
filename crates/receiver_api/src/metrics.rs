//! Metrics recording for webhook deliveries.
//!
//! # Metrics
//! - `webhooks_received_total{outcome}` (Counter), outcome one of
//!   `accepted`, `preflight`, `bad_signature`, `stale_timestamp`,
//!   `timestamp_error`

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use receiver_core::{AuthenticationError, DispatchOutcome};
use thiserror::Error;

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

/// Result of handling one delivery, as seen by metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Accepted,
    Preflight,
    Rejected(&'static str),
}

impl WebhookOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            WebhookOutcome::Accepted => "accepted",
            WebhookOutcome::Preflight => "preflight",
            WebhookOutcome::Rejected(kind) => *kind,
        }
    }
}

impl From<&Result<DispatchOutcome, AuthenticationError>> for WebhookOutcome {
    fn from(result: &Result<DispatchOutcome, AuthenticationError>) -> Self {
        match result {
            Ok(DispatchOutcome::Pong) => WebhookOutcome::Preflight,
            Ok(DispatchOutcome::Actions { .. }) => WebhookOutcome::Accepted,
            Err(err) => WebhookOutcome::Rejected(err.kind()),
        }
    }
}

/// Failure to render metrics.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("metrics output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Abstraction for recording delivery metrics.
///
/// # Thread Safety
/// Implementations are shared across all request tasks.
pub trait WebhookMetrics: Send + Sync {
    /// Records the outcome of one delivery.
    fn record(&self, outcome: WebhookOutcome);

    /// Renders all metrics in Prometheus text exposition format.
    fn render(&self) -> Result<String, MetricsError>;
}

/// Prometheus metrics collector backed by its own registry.
pub struct PrometheusWebhookMetrics {
    registry: Registry,
    received: IntCounterVec,
}

impl PrometheusWebhookMetrics {
    /// Creates a collector and registers its metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric definitions are rejected by the registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let received = IntCounterVec::new(
            Opts::new(
                "webhooks_received_total",
                "Webhook deliveries received, by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(received.clone()))?;

        Ok(Self { registry, received })
    }

    /// Current count for one outcome label.
    pub fn count(&self, outcome: WebhookOutcome) -> u64 {
        self.received.with_label_values(&[outcome.label()]).get()
    }
}

impl WebhookMetrics for PrometheusWebhookMetrics {
    fn record(&self, outcome: WebhookOutcome) {
        self.received.with_label_values(&[outcome.label()]).inc();
    }

    fn render(&self) -> Result<String, MetricsError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// No-op metrics implementation for tests or when metrics are disabled.
#[derive(Debug, Default)]
pub struct NoOpWebhookMetrics;

impl NoOpWebhookMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl WebhookMetrics for NoOpWebhookMetrics {
    fn record(&self, _outcome: WebhookOutcome) {}

    fn render(&self) -> Result<String, MetricsError> {
        Ok(String::new())
    }
}
