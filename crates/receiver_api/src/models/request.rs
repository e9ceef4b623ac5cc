//! HTTP request models
//!
//! WARest puts all delivery metadata in `X-WAREST-*` headers. The body is
//! read separately as raw bytes because the signature covers it exactly as
//! sent.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use receiver_core::InboundWebhook;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// `label=hexdigest` signature of the raw body
pub const SIGNATURE_HEADER: &str = "x-warest-signature";

/// Algorithm hint, e.g. `HMAC-SHA256`
pub const SIGNATURE_ALG_HEADER: &str = "x-warest-signature-alg";

/// Identity mixed into the HMAC key
pub const USERNAME_HEADER: &str = "x-warest-username";

/// Event type
pub const EVENT_HEADER: &str = "x-warest-event";

/// Session identifier, logged only
pub const SESSION_HEADER: &str = "x-warest-session";

/// Sender timestamp in epoch milliseconds
pub const TIMESTAMP_HEADER: &str = "x-warest-timestamp";

/// Delivery identifier, logged only
pub const EVENT_ID_HEADER: &str = "x-warest-event-id";

/// Protocol version, logged only
pub const VERSION_HEADER: &str = "x-warest-version";

/// Delivery metadata extracted from the `X-WAREST-*` headers.
///
/// Absent headers are `None`. Values are read as UTF-8 when valid and as
/// Latin-1 otherwise, the encoding Node.js senders use for non-ASCII text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub signature: Option<String>,
    pub signature_alg: Option<String>,
    pub username: Option<String>,
    pub event: Option<String>,
    pub session: Option<String>,
    pub timestamp: Option<String>,
    pub event_id: Option<String>,
    pub version: Option<String>,
}

impl WebhookHeaders {
    /// Extract the WARest headers from a header map.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let get = |name: &str| headers.get(name).map(|v| header_text(v.as_bytes()));

        Self {
            signature: get(SIGNATURE_HEADER),
            signature_alg: get(SIGNATURE_ALG_HEADER),
            username: get(USERNAME_HEADER),
            event: get(EVENT_HEADER),
            session: get(SESSION_HEADER),
            timestamp: get(TIMESTAMP_HEADER),
            event_id: get(EVENT_ID_HEADER),
            version: get(VERSION_HEADER),
        }
    }

    /// Borrow these headers and `body` as core input.
    pub fn as_inbound<'a>(&'a self, body: &'a [u8]) -> InboundWebhook<'a> {
        InboundWebhook {
            body,
            signature: self.signature.as_deref(),
            algorithm: self.signature_alg.as_deref(),
            username: self.username.as_deref(),
            event: self.event.as_deref(),
            timestamp: self.timestamp.as_deref(),
        }
    }
}

/// Decodes a header value, falling back to Latin-1 for bytes that are not
/// UTF-8. Every byte sequence decodes.
pub fn header_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for WebhookHeaders
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_header_map(&parts.headers))
    }
}
