//! Conversion from wire types to domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use ohlink_core::{ChatMessage, Conversation, ConversationPage, MessageSender};

use crate::error::{HttpError, HttpResult};
use crate::models::{ApiConversation, ApiMessage, ConversationsResponse};

/// Naive timestamps the server emits without an offset; read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a server timestamp.
///
/// Accepts RFC 3339, or an offset-less ISO-8601 date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> HttpResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| HttpError::InvalidResponse {
            message: format!("unparseable timestamp '{raw}'"),
        })
}

pub fn to_conversation(api: ApiConversation) -> Conversation {
    Conversation {
        conversation_id: api.conversation_id,
        title: api.title,
        last_updated_at: api.last_updated_at,
        status: api.status,
    }
}

pub fn to_conversation_page(response: ConversationsResponse) -> ConversationPage {
    ConversationPage {
        results: response.results.into_iter().map(to_conversation).collect(),
        next_page_id: response.next_page_id,
    }
}

/// Map a server message to the client shape.
pub fn to_chat_message(api: ApiMessage) -> HttpResult<ChatMessage> {
    Ok(ChatMessage {
        id: api.id.to_string(),
        sender: MessageSender::from_sender_type(&api.sender_type),
        timestamp: parse_timestamp(&api.created_at)?,
        text: api.content,
    })
}

/// Map a list of server messages, failing on the first bad entry.
pub fn to_chat_messages(messages: Vec<ApiMessage>) -> HttpResult<Vec<ChatMessage>> {
    messages.into_iter().map(to_chat_message).collect()
}
