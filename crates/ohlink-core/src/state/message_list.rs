//! Message list with optimistic sends.
//!
//! Sending is a two-phase commit on the list: a provisional entry is
//! inserted as soon as the user submits, then either replaced by the
//! server-confirmed message or removed if the send fails.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ChatMessage, MessageSender, sort_chronologically};

const PROVISIONAL_PREFIX: &str = "local-";

/// Handle to a provisional message awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProvisionalId(String);

impl ProvisionalId {
    fn generate() -> Self {
        Self(format!("{PROVISIONAL_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProvisionalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Messages of one conversation, always ascending by timestamp.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<ChatMessage>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched list.
    pub fn replace_all(&mut self, mut messages: Vec<ChatMessage>) {
        sort_chronologically(&mut messages);
        self.messages = messages;
    }

    /// Phase one: show the user's text immediately under a local id.
    pub fn insert_provisional(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> ProvisionalId {
        let id = ProvisionalId::generate();
        self.messages.push(ChatMessage {
            id: id.0.clone(),
            text: text.into(),
            sender: MessageSender::User,
            timestamp: now,
        });
        sort_chronologically(&mut self.messages);
        id
    }

    /// Phase two (success): swap the provisional entry for the confirmed one.
    ///
    /// The server's id and timestamp win. If the provisional entry is gone
    /// (e.g. the list was refreshed meanwhile) the confirmed message is added
    /// unless a message with the same id is already present.
    pub fn confirm(&mut self, provisional: &ProvisionalId, confirmed: ChatMessage) {
        self.messages.retain(|m| m.id != provisional.0);
        if !self.messages.iter().any(|m| m.id == confirmed.id) {
            self.messages.push(confirmed);
        }
        sort_chronologically(&mut self.messages);
    }

    /// Phase two (failure): drop the provisional entry.
    pub fn discard(&mut self, provisional: &ProvisionalId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != provisional.0);
        self.messages.len() != before
    }

    /// Whether `id` names a message that has not been confirmed yet.
    pub fn is_provisional(&self, id: &str) -> bool {
        id.starts_with(PROVISIONAL_PREFIX) && self.messages.iter().any(|m| m.id == id)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
