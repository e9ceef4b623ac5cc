//! Environment configuration for the receiver binary.
//!
//! # Environment Variables
//!
//! - `PORT`: Port to listen on (default: 8080)
//! - `HOST`: Host to bind to (default: 0.0.0.0)
//! - `WAREST_SECRET`: Comma separated shared secrets (required)
//! - `WAREST_VERIFY_TS`: Enforce `X-WAREST-Timestamp` freshness (default: off)
//! - `WAREST_TOLERANCE_SEC`: Freshness tolerance in seconds (default: 300)
//! - `DEBUG_SIGNATURE`: Log secrets and digests on signature mismatch (default: off)
//! - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `RECEIVER_LOG_FORMAT`: `json` for structured logs, anything else for text

use std::str::FromStr;

use receiver_core::{replay::DEFAULT_TOLERANCE_SECONDS, ConfigurationError, ReceiverConfig, SecretSet};

use crate::{ApiConfig, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const SECRET_VAR: &str = "WAREST_SECRET";
pub const VERIFY_TS_VAR: &str = "WAREST_VERIFY_TS";
pub const TOLERANCE_VAR: &str = "WAREST_TOLERANCE_SEC";
pub const DEBUG_SIGNATURE_VAR: &str = "DEBUG_SIGNATURE";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "RECEIVER_LOG_FORMAT";

/// Log output format selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Everything the binary reads from its environment.
#[derive(Debug)]
pub struct Settings {
    pub api: ApiConfig,
    pub receiver: ReceiverConfig,
    pub log_format: LogFormat,
}

/// Load settings from the process environment.
///
/// # Errors
///
/// Returns an error if `WAREST_SECRET` yields no secrets or any variable
/// holds a value that cannot be parsed.
pub fn load_from_env() -> Result<Settings, ConfigurationError> {
    load_with(|name| std::env::var(name).ok())
}

/// Load settings through an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<Settings, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let secrets = SecretSet::parse_list(&lookup(SECRET_VAR).unwrap_or_default())?;

    let mut receiver = ReceiverConfig::new(secrets)
        .with_debug_signature(parse_flag(DEBUG_SIGNATURE_VAR, lookup(DEBUG_SIGNATURE_VAR))?);
    if parse_flag(VERIFY_TS_VAR, lookup(VERIFY_TS_VAR))? {
        let tolerance =
            parse_number(TOLERANCE_VAR, lookup(TOLERANCE_VAR), DEFAULT_TOLERANCE_SECONDS)?;
        receiver = receiver.with_timestamp_verification(tolerance);
    }

    let api = ApiConfig {
        port: parse_number(PORT_VAR, lookup(PORT_VAR), DEFAULT_PORT)?,
        host: lookup(HOST_VAR)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| ApiConfig::default().host),
        request_timeout_secs: parse_number(
            REQUEST_TIMEOUT_VAR,
            lookup(REQUEST_TIMEOUT_VAR),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?,
    };

    Ok(Settings {
        api,
        receiver,
        log_format: LogFormat::from_value(lookup(LOG_FORMAT_VAR).as_deref()),
    })
}

/// Parse an on/off switch. Unset or empty means off.
pub fn parse_flag(name: &str, value: Option<String>) -> Result<bool, ConfigurationError> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigurationError::InvalidValue {
            name: name.to_string(),
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}

fn parse_number<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigurationError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
