//! Wire types for the conversation server API.
//!
//! These types are internal to `ohlink-http`. External consumers use the
//! domain types in `ohlink-core`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversations
// ============================================================================

/// `GET /api/conversations` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsResponse {
    pub results: Vec<ApiConversation>,
    #[serde(default)]
    pub next_page_id: Option<String>,
}

/// Conversation as sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConversation {
    pub conversation_id: String,
    #[serde(default)]
    pub title: String,
    pub last_updated_at: String,
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// Messages
// ============================================================================

/// Message ids arrive as strings or numbers depending on the server build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Message as sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub id: MessageId,
    pub content: String,
    /// `user`, `assistant` or `system`
    pub sender_type: String,
    pub created_at: String,
}

/// `GET /api/conversations/{id}/messages` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ApiMessage>,
}

/// `POST /api/conversations/{id}/messages` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub content: &'a str,
}

// ============================================================================
// Errors
// ============================================================================

/// Error body some endpoints return alongside a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract a non-empty `message` from a raw body, if it parses.
    pub fn message_from(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(bytes)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty())
    }
}
