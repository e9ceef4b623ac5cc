//! Replay protection based on the `X-WAREST-Timestamp` header.
//!
//! Senders stamp each delivery with epoch milliseconds. When enforcement is
//! enabled the receiver rejects deliveries whose timestamp is further than
//! the tolerance from its own clock, in either direction.

use tracing::warn;

use crate::errors::{AuthenticationError, TimestampError};

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;

/// Default freshness tolerance in seconds.
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 300;

/// Returns true iff `|now_millis - claimed_millis| <= tolerance_seconds * 1000`.
///
/// The boundary is inclusive.
pub fn is_fresh(claimed_millis: i64, now_millis: i64, tolerance_seconds: u64) -> bool {
    now_millis.abs_diff(claimed_millis) <= tolerance_seconds.saturating_mul(1000)
}

/// Parses a timestamp header value as epoch milliseconds.
///
/// # Errors
///
/// `TimestampError::Missing` for an absent or blank header,
/// `TimestampError::Invalid` for anything that is not a decimal integer.
pub fn parse_timestamp(raw: Option<&str>) -> Result<i64, TimestampError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(TimestampError::Missing);
    }

    value.parse::<i64>().map_err(|_| TimestampError::Invalid {
        value: value.to_string(),
    })
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Freshness policy built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayGuard {
    enabled: bool,
    tolerance_seconds: u64,
}

impl ReplayGuard {
    /// Guard that enforces the given tolerance.
    pub fn enforcing(tolerance_seconds: u64) -> Self {
        Self {
            enabled: true,
            tolerance_seconds,
        }
    }

    /// Guard that treats every request as fresh.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tolerance_seconds(&self) -> u64 {
        self.tolerance_seconds
    }

    /// Checks a raw timestamp header against `now_millis`.
    ///
    /// When the guard is disabled the header is not even parsed. When it is
    /// enabled a missing or unparseable header fails closed.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError::InvalidTimestamp` if the header is unusable
    /// - `AuthenticationError::StaleTimestamp` if it lies outside the window
    pub fn check(&self, raw_timestamp: Option<&str>, now_millis: i64) -> Result<(), AuthenticationError> {
        if !self.enabled {
            return Ok(());
        }

        let claimed = parse_timestamp(raw_timestamp).inspect_err(|e| {
            warn!(error = %e, "Rejected webhook with unusable timestamp");
        })?;

        if is_fresh(claimed, now_millis, self.tolerance_seconds) {
            return Ok(());
        }

        let age_ms = now_millis.abs_diff(claimed);
        warn!(
            age_ms,
            tolerance_seconds = self.tolerance_seconds,
            "Timestamp out of tolerance"
        );
        Err(AuthenticationError::StaleTimestamp {
            age_ms,
            tolerance_seconds: self.tolerance_seconds,
        })
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::disabled()
    }
}
