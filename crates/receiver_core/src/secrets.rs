//! Shared secrets used to verify webhook signatures.
//!
//! Several secrets may be active at once so a sender can rotate its key
//! without dropping deliveries. Secret values never appear in `Debug`
//! output; they are only exposed to the HMAC key derivation.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;

/// Ordered, non-empty list of shared secrets.
///
/// Verification tries the secrets in insertion order and stops at the first
/// match.
#[derive(Debug)]
pub struct SecretSet {
    secrets: Vec<SecretString>,
}

impl SecretSet {
    /// Builds a secret set from the given values, in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoSecrets` if `secrets` is empty.
    pub fn new<I, S>(secrets: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let secrets: Vec<SecretString> = secrets
            .into_iter()
            .map(|s| SecretString::from(s.into()))
            .collect();

        if secrets.is_empty() {
            return Err(ConfigurationError::NoSecrets);
        }

        Ok(Self { secrets })
    }

    /// Parses a comma-separated secret list such as `"old,new"`.
    ///
    /// Entries are trimmed and empty entries are dropped.
    pub fn parse_list(raw: &str) -> Result<Self, ConfigurationError> {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    /// Number of configured secrets.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Always false; a `SecretSet` cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Iterates over the secret values in verification order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.secrets.iter().map(|s| s.expose_secret())
    }
}
