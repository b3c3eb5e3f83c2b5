//! Terminal formatting for conversations and messages.

use chrono::{DateTime, Utc};
use ohlink_core::{ChatMessage, Conversation, MessageSender};

const TITLE_WIDTH: usize = 40;

/// Truncates a string to at most `max_chars` characters, adding "..." if needed.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

const fn sender_label(sender: MessageSender) -> &'static str {
    match sender {
        MessageSender::User => "you",
        MessageSender::Bot => "bot",
    }
}

/// One line per conversation: id, title, status and last update.
pub fn conversation_row(conversation: &Conversation) -> String {
    let title = if conversation.title.trim().is_empty() {
        "(untitled)"
    } else {
        conversation.title.as_str()
    };
    format!(
        "{:<36}  {:<TITLE_WIDTH$}  {:<10}  {}",
        conversation.conversation_id,
        truncate_string(title, TITLE_WIDTH),
        conversation.status.as_deref().unwrap_or("-"),
        conversation.last_updated_at,
    )
}

/// A message as `[time] sender: text`.
pub fn message_line(message: &ChatMessage) -> String {
    format!(
        "[{}] {}: {}",
        format_timestamp(&message.timestamp),
        sender_label(message.sender),
        message.text
    )
}
