//! Chat boundary types and the reply-sink port.
//!
//! The chat transport itself (a messenger client, a webhook receiver) lives
//! outside this crate. It produces [`InboundEvent`]s and consumes
//! [`Reply`]s through the [`ReplySink`] port; everything here is
//! serde-serializable so a webhook-style transport can carry the types
//! directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{GoalId, Timestamp, UserId};

/// One event delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// The transport-assigned user id.
    pub user_id: UserId,
    /// Display handle, when the transport knows one.
    pub handle: Option<String>,
    /// When the transport received the event.
    pub received_at: Timestamp,
    /// What the user did.
    #[serde(flatten)]
    pub kind: InboundKind,
}

/// The payload of an inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundKind {
    /// A slash command.
    Command(ChatCommand),
    /// Free text.
    Text(String),
    /// A structured action from the companion app or a reply button.
    Action(ChatAction),
}

/// Commands the gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCommand {
    /// First contact; registers the user and shows the action menu.
    Start,
    /// Begins a goal-setup dialog.
    SetGoals,
    /// Abandons an in-progress goal-setup dialog.
    Cancel,
}

/// Structured action payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChatAction {
    /// Log one completion against a goal.
    LogGoal { goal_id: GoalId },
}

/// An outbound reply rendered by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Message body.
    pub text: String,
    /// Selectable actions to attach, in display order.
    pub actions: Vec<ReplyAction>,
}

impl Reply {
    /// A plain text reply with no attached actions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    /// A reply with selectable actions.
    pub fn with_actions(text: impl Into<String>, actions: Vec<ReplyAction>) -> Self {
        Self {
            text: text.into(),
            actions,
        }
    }
}

/// Actions a reply can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    /// Open the companion web app.
    OpenApp { url: String },
    /// Start the goal-setup dialog.
    SetGoals,
}

/// Errors raised while delivering a reply.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Outbound reply port implemented by the chat transport.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Delivers a reply to the given user.
    ///
    /// # Errors
    ///
    /// - `Transport` on delivery failure
    async fn send(&self, user_id: UserId, reply: Reply) -> Result<(), ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn log_goal_action_deserializes_from_payload_json() {
        let json = r#"{"action": "log_goal", "goal_id": 7}"#;
        let action: ChatAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ChatAction::LogGoal {
                goal_id: GoalId::new(7)
            }
        );
    }

    #[test]
    fn inbound_event_roundtrips_through_json() {
        let event = InboundEvent {
            user_id: UserId::new(42),
            handle: Some("sam".to_string()),
            received_at: Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(),
            ),
            kind: InboundKind::Text("2 Gym".to_string()),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: InboundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn reply_text_has_no_actions() {
        let reply = Reply::text("Hello");
        assert_eq!(reply.text, "Hello");
        assert!(reply.actions.is_empty());
    }

    // Trait object safety test
    #[test]
    fn reply_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn ReplySink) {}
    }
}
