//! Error types for webhook authentication and configuration.
//!
//! Messages on [`AuthenticationError`] are returned verbatim to webhook
//! senders, so they are short, stable and never include secret material.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Authentication failures that reject a webhook delivery.
///
/// Every variant maps to HTTP 401 at the transport boundary. Dispatch never
/// runs once one of these has been produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The signature header was missing or malformed, or no configured
    /// secret produced a matching digest.
    #[error("bad signature")]
    BadSignature,

    /// The claimed timestamp lies outside the configured tolerance window.
    #[error("stale timestamp")]
    StaleTimestamp { age_ms: u64, tolerance_seconds: u64 },

    /// Freshness enforcement is enabled but the timestamp header is unusable.
    #[error("timestamp error")]
    InvalidTimestamp(#[from] TimestampError),
}

impl AuthenticationError {
    /// Stable machine-readable name used for logging and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthenticationError::BadSignature => "bad_signature",
            AuthenticationError::StaleTimestamp { .. } => "stale_timestamp",
            AuthenticationError::InvalidTimestamp(_) => "timestamp_error",
        }
    }
}

/// Failure to read the `X-WAREST-Timestamp` header as epoch milliseconds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp header is missing")]
    Missing,

    #[error("timestamp '{value}' is not an integer number of milliseconds")]
    Invalid { value: String },
}

/// Invalid receiver configuration detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least one shared secret must be configured")]
    NoSecrets,

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
