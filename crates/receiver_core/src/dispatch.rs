//! Translation of verified events into reply actions.
//!
//! Only `message_received` produces actions; `preflight` is acknowledged
//! separately and every other event type yields an empty list.

use tracing::debug;

use crate::actions::Action;
use crate::events::{Event, MessageReceived, WebhookEnvelope};

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

/// Pacing hint returned with every action list.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 600;

/// Reply text for the `test` command.
pub const PONG_TEXT: &str = "pong";

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Connectivity acknowledgement for a preflight delivery.
    Pong,
    /// Actions to perform, with a suggested delay between them.
    Actions { actions: Vec<Action>, delay_ms: u64 },
}

impl DispatchOutcome {
    fn actions(actions: Vec<Action>) -> Self {
        DispatchOutcome::Actions {
            actions,
            delay_ms: DEFAULT_REPLY_DELAY_MS,
        }
    }

    /// Number of actions produced; zero for a preflight acknowledgement.
    pub fn action_count(&self) -> usize {
        match self {
            DispatchOutcome::Pong => 0,
            DispatchOutcome::Actions { actions, .. } => actions.len(),
        }
    }
}

/// Dispatches the event of type `event_type` carried in `payload`.
pub fn dispatch(event_type: &str, payload: &WebhookEnvelope) -> DispatchOutcome {
    dispatch_event(&Event::from_envelope(event_type, payload))
}

/// Dispatches an already decoded event.
pub fn dispatch_event(event: &Event) -> DispatchOutcome {
    match event {
        Event::Preflight => DispatchOutcome::Pong,
        Event::MessageReceived(message) => DispatchOutcome::actions(message_actions(message)),
        Event::Other { event_type } => {
            debug!(event_type = %event_type, "No handling for event type");
            DispatchOutcome::actions(Vec::new())
        }
    }
}

fn message_actions(message: &MessageReceived) -> Vec<Action> {
    let text = message.normalized_text();
    let to = message.destination();
    let key = message.message_key();
    let mut actions = Vec::new();

    // The two documented commands are checked independently of each other.
    if let (Some(to), "test") = (to, text.as_str()) {
        actions.push(Action::text(to, PONG_TEXT));
    }
    if let (Some(to), Some(key), "react") = (to, key, text.as_str()) {
        actions.push(Action::react(to, key.clone()));
    }

    let Some(to) = to else {
        return actions;
    };

    match (text.as_str(), key) {
        ("read", Some(key)) => actions.push(Action::read(to, key.clone())),
        ("star", Some(key)) => actions.push(Action::star(to, key.clone())),
        ("typing", _) => {
            actions.push(Action::typing(to, 12_000));
            actions.push(Action::text(to, "Typing done."));
        }
        ("presence", _) => {
            actions.push(Action::presence(to, "available"));
            actions.push(Action::delay(to, 500, Some("composing".to_string())));
        }
        ("location", _) => {
            actions.push(Action::location(to, -6.2, 106.816666, "HQ", "Jakarta"));
        }
        _ => {}
    }

    actions
}
