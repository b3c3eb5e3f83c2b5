//! Conversation domain types.
//!
//! These are the client-side shapes. Wire formats live in the HTTP adapter
//! and are mapped into these at the port boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation snapshot as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub title: String,
    /// ISO-8601 timestamp, kept verbatim.
    pub last_updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One page of conversations.
///
/// `next_page_id` is carried through but never followed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationPage {
    pub results: Vec<Conversation>,
    pub next_page_id: Option<String>,
}

/// Who authored a message, from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Bot,
}

impl MessageSender {
    /// Map a server `sender_type` to a client sender.
    ///
    /// Only `"user"` maps to [`MessageSender::User`]; assistant, system and
    /// anything unknown render as the bot.
    #[must_use]
    pub fn from_sender_type(sender_type: &str) -> Self {
        if sender_type == "user" {
            Self::User
        } else {
            Self::Bot
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat message in client form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: MessageSender,
    pub timestamp: DateTime<Utc>,
}

/// Sort messages ascending by timestamp, keeping server order for ties.
pub fn sort_chronologically(messages: &mut [ChatMessage]) {
    messages.sort_by_key(|m| m.timestamp);
}
