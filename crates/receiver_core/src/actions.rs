//! Reply actions returned to WARest in the webhook response.
//!
//! WARest understands two families of action objects: messages, tagged with
//! `"type"`, and control actions, tagged with `"act"`. Both are serialized
//! flat so the response body reads e.g.
//! `{"type":"text","to":"123@s.whatsapp.net","text":"pong"}`.

use serde::Serialize;

use crate::events::MessageKey;

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;

/// Emoji used for reactions.
pub const REACTION_EMOJI: &str = "\u{1F44D}";

/// One instruction for the upstream platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    Message(MessageAction),
    Control(ControlAction),
}

/// Outbound messages, serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageAction {
    Text {
        to: String,
        text: String,
    },
    Location {
        to: String,
        lat: f64,
        lng: f64,
        name: String,
        address: String,
    },
}

/// Chat-level operations, serialized with an `act` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "act", rename_all = "lowercase")]
pub enum ControlAction {
    React {
        to: String,
        key: MessageKey,
        emoji: String,
    },
    Read {
        to: String,
        key: MessageKey,
    },
    Star {
        to: String,
        key: MessageKey,
    },
    Typing {
        to: String,
        ms: u64,
    },
    Presence {
        to: String,
        state: String,
    },
    Delay {
        to: String,
        ms: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<String>,
    },
}

impl Action {
    pub fn text(to: impl Into<String>, text: impl Into<String>) -> Self {
        Action::Message(MessageAction::Text {
            to: to.into(),
            text: text.into(),
        })
    }

    /// Reaction with [`REACTION_EMOJI`] on the message identified by `key`.
    pub fn react(to: impl Into<String>, key: MessageKey) -> Self {
        Action::Control(ControlAction::React {
            to: to.into(),
            key,
            emoji: REACTION_EMOJI.to_string(),
        })
    }

    pub fn read(to: impl Into<String>, key: MessageKey) -> Self {
        Action::Control(ControlAction::Read { to: to.into(), key })
    }

    pub fn star(to: impl Into<String>, key: MessageKey) -> Self {
        Action::Control(ControlAction::Star { to: to.into(), key })
    }

    pub fn typing(to: impl Into<String>, ms: u64) -> Self {
        Action::Control(ControlAction::Typing { to: to.into(), ms })
    }

    pub fn presence(to: impl Into<String>, state: impl Into<String>) -> Self {
        Action::Control(ControlAction::Presence {
            to: to.into(),
            state: state.into(),
        })
    }

    pub fn delay(to: impl Into<String>, ms: u64, state: Option<String>) -> Self {
        Action::Control(ControlAction::Delay {
            to: to.into(),
            ms,
            state,
        })
    }

    pub fn location(
        to: impl Into<String>,
        lat: f64,
        lng: f64,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Action::Message(MessageAction::Location {
            to: to.into(),
            lat,
            lng,
            name: name.into(),
            address: address.into(),
        })
    }
}
