//! Process-wide receiver configuration.
//!
//! Built once at startup and shared read-only with every request. Loading it
//! from the environment is the HTTP binary's job; this type only holds the
//! values the core needs.

use crate::replay::{ReplayGuard, DEFAULT_TOLERANCE_SECONDS};
use crate::secrets::SecretSet;
use crate::signature::SignatureVerifier;

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

/// Settings for signature verification and freshness enforcement.
#[derive(Debug)]
pub struct ReceiverConfig {
    /// Secrets tried in order when verifying a signature.
    pub secrets: SecretSet,

    /// Whether `X-WAREST-Timestamp` must be present and fresh.
    pub verify_timestamp: bool,

    /// Freshness tolerance in seconds, used when `verify_timestamp` is set.
    pub tolerance_seconds: u64,

    /// Log secrets and digests on every signature mismatch. Local debugging only.
    pub debug_signature: bool,
}

impl ReceiverConfig {
    /// Configuration with the given secrets, no timestamp enforcement and no
    /// debug tracing.
    pub fn new(secrets: SecretSet) -> Self {
        Self {
            secrets,
            verify_timestamp: false,
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            debug_signature: false,
        }
    }

    /// Enables freshness enforcement with the given tolerance.
    pub fn with_timestamp_verification(mut self, tolerance_seconds: u64) -> Self {
        self.verify_timestamp = true;
        self.tolerance_seconds = tolerance_seconds;
        self
    }

    pub fn with_debug_signature(mut self, enabled: bool) -> Self {
        self.debug_signature = enabled;
        self
    }

    /// Replay guard matching this configuration.
    pub fn replay_guard(&self) -> ReplayGuard {
        if self.verify_timestamp {
            ReplayGuard::enforcing(self.tolerance_seconds)
        } else {
            ReplayGuard::disabled()
        }
    }

    /// Signature verifier matching this configuration.
    pub fn verifier(&self) -> SignatureVerifier {
        SignatureVerifier::new(self.debug_signature)
    }
}
