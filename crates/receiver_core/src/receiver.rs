//! End-to-end handling of one inbound delivery.
//!
//! Order matters: the signature is verified first, then freshness (when
//! enabled), and only then is the body dispatched. A failure at any step
//! returns before the next one runs.

use tracing::{debug, info};

use crate::algorithm::AlgorithmId;
use crate::configuration::ReceiverConfig;
use crate::dispatch::{dispatch, DispatchOutcome};
use crate::errors::AuthenticationError;
use crate::events::WebhookEnvelope;
use crate::signature::VerificationContext;

#[cfg(test)]
#[path = "receiver_tests.rs"]
mod tests;

/// Request data the core needs, borrowed from the transport layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct InboundWebhook<'a> {
    /// Raw body bytes as received.
    pub body: &'a [u8],
    /// `X-WAREST-Signature`
    pub signature: Option<&'a str>,
    /// `X-WAREST-Signature-Alg`
    pub algorithm: Option<&'a str>,
    /// `X-WAREST-Username`
    pub username: Option<&'a str>,
    /// `X-WAREST-Event`
    pub event: Option<&'a str>,
    /// `X-WAREST-Timestamp`
    pub timestamp: Option<&'a str>,
}

/// Verifies the signature and, if enabled, the timestamp of a delivery.
///
/// # Errors
///
/// - `AuthenticationError::BadSignature` when no secret matches
/// - `AuthenticationError::InvalidTimestamp` / `StaleTimestamp` when
///   freshness enforcement rejects the delivery
pub fn authenticate(
    config: &ReceiverConfig,
    webhook: &InboundWebhook<'_>,
    now_millis: i64,
) -> Result<(), AuthenticationError> {
    let algorithm = AlgorithmId::resolve(webhook.algorithm.unwrap_or_default());
    let context = VerificationContext {
        body: webhook.body,
        signature: webhook.signature,
        identity: webhook.username.unwrap_or_default(),
        algorithm,
    };

    if !config.verifier().verify(&context, &config.secrets) {
        return Err(AuthenticationError::BadSignature);
    }

    config.replay_guard().check(webhook.timestamp, now_millis)
}

/// Authenticates a delivery and dispatches its event.
///
/// The event type comes from the `X-WAREST-Event` header, falling back to
/// the body's `event` field.
pub fn process(
    config: &ReceiverConfig,
    webhook: &InboundWebhook<'_>,
    now_millis: i64,
) -> Result<DispatchOutcome, AuthenticationError> {
    authenticate(config, webhook, now_millis)?;

    let envelope = WebhookEnvelope::from_body(webhook.body);
    let event_type = webhook
        .event
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .or_else(|| envelope.event.clone())
        .unwrap_or_default();

    let session = envelope.session.as_ref();
    debug!(
        event = %event_type,
        session_id = session.and_then(|s| s.id.as_deref()).unwrap_or("(none)"),
        session_label = session.and_then(|s| s.label.as_deref()).unwrap_or("(none)"),
        session_registry = session.and_then(|s| s.registry.as_deref()).unwrap_or("(none)"),
        session_username = session.and_then(|s| s.username.as_deref()).unwrap_or("(none)"),
        sent_at = ?envelope.ts,
        "Envelope decoded"
    );

    let outcome = dispatch(&event_type, &envelope);
    match &outcome {
        DispatchOutcome::Pong => info!(event = %event_type, "Preflight acknowledged"),
        DispatchOutcome::Actions { actions, .. } => debug!(
            event = %event_type,
            actions = actions.len(),
            "Event dispatched"
        ),
    }

    Ok(outcome)
}
