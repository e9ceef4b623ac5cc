//! WARest webhook receiver
//!
//! Main binary for running the receiver in production or development.
//! See [`receiver_api::config`] for the environment variables it reads.

use std::{sync::Arc, time::Duration};

use receiver_api::{
    config::{self, LogFormat},
    metrics::PrometheusWebhookMetrics,
    AppState, ApiServer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = config::load_from_env()?;

    init_tracing(settings.log_format);

    if settings.receiver.debug_signature {
        tracing::warn!(
            "DEBUG_SIGNATURE is enabled: secrets and digests will be logged on signature mismatch"
        );
    }

    let metrics = Arc::new(PrometheusWebhookMetrics::new()?);
    let state = AppState::new(settings.receiver, metrics)
        .with_request_timeout(Duration::from_secs(settings.api.request_timeout_secs));

    tracing::info!("Starting WARest webhook receiver");
    tracing::info!(
        secrets = state.receiver.secrets.len(),
        verify_timestamp = state.receiver.verify_timestamp,
        tolerance_seconds = state.receiver.tolerance_seconds,
        "Receiver configured"
    );

    // Start server with graceful shutdown
    ApiServer::new(settings.api, state).serve().await
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
