//! Request-status container for the conversation list.

use serde::{Deserialize, Serialize};

use crate::domain::Conversation;

/// Status of the most recent list fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Conversation list plus the status of the fetch that produced it.
///
/// Not a cache: every successful fetch replaces the whole list, and nothing
/// ever moves back to `Idle` on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationListState {
    pub conversations: Vec<Conversation>,
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl ConversationListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_start(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    pub fn fetch_succeeded(&mut self, conversations: Vec<Conversation>) {
        self.status = FetchStatus::Succeeded;
        self.conversations = conversations;
        self.error = None;
    }

    /// Record a failure. The previously loaded list is left untouched.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Failed;
        self.error = Some(message.into());
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}
