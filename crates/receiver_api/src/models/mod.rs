//! HTTP request and response models
//!
//! These types exist only in the HTTP layer. Request models pull the
//! `X-WAREST-*` headers out of a request; response models render core
//! results as JSON.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::WebhookHeaders;
pub use response::{HealthCheckResponse, WebhookResponse};
