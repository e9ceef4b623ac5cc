//! Typed views of inbound webhook payloads.
//!
//! WARest sends a JSON envelope `{ event, data, ts, session }`. The `data`
//! shape depends on the event type, so the envelope keeps it as raw JSON and
//! [`Event::from_envelope`] decodes it into the record for that event.
//! Fields the sender omitted, or sent with the wrong type, are `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

/// Event type for the connectivity check sent when a webhook is registered.
pub const PREFLIGHT_EVENT: &str = "preflight";

/// Event type for an incoming chat message.
pub const MESSAGE_RECEIVED_EVENT: &str = "message_received";

/// Outer JSON envelope of a delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookEnvelope {
    /// Event type as written in the body; the header takes precedence.
    pub event: Option<String>,
    /// Event-specific data.
    pub data: Option<Value>,
    /// Sender timestamp in epoch milliseconds.
    pub ts: Option<i64>,
    /// Session that produced the event.
    pub session: Option<SessionInfo>,
}

impl WebhookEnvelope {
    /// Decodes a raw request body.
    ///
    /// An empty, unparseable or non-object body yields an empty envelope, the
    /// same as `{}`. Each field is decoded on its own so one malformed field
    /// does not discard the others.
    pub fn from_body(body: &[u8]) -> Self {
        let mut object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => object,
            Ok(_) | Err(_) => {
                if !body.is_empty() {
                    debug!("Webhook body is not a JSON object, treating as empty");
                }
                Map::new()
            }
        };

        Self {
            event: take_field(&mut object, "event"),
            data: object.remove("data").filter(|v| !v.is_null()),
            ts: take_field(&mut object, "ts"),
            session: take_field(&mut object, "session"),
        }
    }
}

fn take_field<T: DeserializeOwned>(object: &mut Map<String, Value>, name: &str) -> Option<T> {
    object
        .remove(name)
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Field decoder that turns a value of the wrong type into `None` instead of
/// failing the enclosing record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(serde_json::from_value(value).ok()),
    }
}

/// Session metadata attached by the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub registry: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
}

/// Opaque message key, echoed back in actions that reference a message.
///
/// WARest usually sends an object (`{ remoteJid, id, fromMe }`) but the
/// receiver never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageKey(pub Value);

impl From<&str> for MessageKey {
    fn from(value: &str) -> Self {
        MessageKey(Value::String(value.to_string()))
    }
}

/// `data` of a `message_received` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceived {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<Sender>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<MessageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    #[serde(default, deserialize_with = "lenient")]
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<MessageKey>,
}

impl MessageReceived {
    /// Message text trimmed and lower-cased; empty when there is no text.
    pub fn normalized_text(&self) -> String {
        self.text
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Chat to reply to, if the sender supplied a non-empty one.
    pub fn destination(&self) -> Option<&str> {
        self.sender
            .as_ref()
            .and_then(|s| s.chat_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Key of the received message, if present.
    pub fn message_key(&self) -> Option<&MessageKey> {
        self.message.as_ref().and_then(|m| m.key.as_ref())
    }
}

/// A verified event, decoded per event type.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Preflight,
    MessageReceived(MessageReceived),
    /// Any event type this receiver has no handling for.
    Other { event_type: String },
}

impl Event {
    /// Decodes `envelope.data` according to `event_type`.
    ///
    /// Message fields are read independently: a field with the wrong type is
    /// `None` and the rest of the message is kept. Data that is not an object
    /// decodes as an empty message, which produces no actions.
    pub fn from_envelope(event_type: &str, envelope: &WebhookEnvelope) -> Self {
        match event_type {
            PREFLIGHT_EVENT => Event::Preflight,
            MESSAGE_RECEIVED_EVENT => {
                let message = match envelope.data.clone() {
                    Some(data @ Value::Object(_)) => {
                        serde_json::from_value::<MessageReceived>(data).unwrap_or_else(|e| {
                            debug!(error = %e, "message_received data has unexpected shape");
                            MessageReceived::default()
                        })
                    }
                    Some(_) => {
                        debug!("message_received data is not an object");
                        MessageReceived::default()
                    }
                    None => MessageReceived::default(),
                };
                Event::MessageReceived(message)
            }
            other => Event::Other {
                event_type: other.to_string(),
            },
        }
    }

    /// Event type tag.
    pub fn event_type(&self) -> &str {
        match self {
            Event::Preflight => PREFLIGHT_EVENT,
            Event::MessageReceived(_) => MESSAGE_RECEIVED_EVENT,
            Event::Other { event_type } => event_type,
        }
    }
}
