//! WARest webhook receiver core
//!
//! This crate holds the authentication and dispatch logic for inbound WARest
//! webhook deliveries. It is transport-agnostic: the HTTP layer extracts the
//! headers and the raw body and hands them to [`receiver::process`].
//!
//! # Architecture
//!
//! Components, leaf-first:
//! - [`algorithm`] - maps the `X-WAREST-Signature-Alg` hint to a hash function
//! - [`signature`] - multi-secret HMAC verification with constant-time comparison
//! - [`replay`] - optional timestamp freshness window
//! - [`events`] / [`dispatch`] / [`actions`] - event-to-action translation
//! - [`receiver`] - runs the steps above in order for one request
//!
//! Nothing in this crate performs I/O or holds mutable state, so every entry
//! point may be called concurrently from any number of request tasks.

pub mod actions;
pub mod algorithm;
pub mod configuration;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod receiver;
pub mod replay;
pub mod secrets;
pub mod signature;

pub use actions::{Action, ControlAction, MessageAction};
pub use algorithm::AlgorithmId;
pub use configuration::ReceiverConfig;
pub use dispatch::{dispatch, DispatchOutcome, DEFAULT_REPLY_DELAY_MS};
pub use errors::{AuthenticationError, ConfigurationError, TimestampError};
pub use events::{Event, MessageKey, MessageReceived, WebhookEnvelope};
pub use receiver::{authenticate, process, InboundWebhook};
pub use replay::{is_fresh, ReplayGuard};
pub use secrets::SecretSet;
pub use signature::{sign_payload, verify, SignatureHeader, SignatureVerifier};
