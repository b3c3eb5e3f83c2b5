//! Backend port traits.
//!
//! The core never speaks HTTP itself. An adapter (see `ohlink-http`)
//! implements [`BackendConnector`] to probe servers and build clients, and
//! each client implements [`ConversationApi`].

use std::sync::Arc;

use async_trait::async_trait;

use super::error::ApiResult;
use crate::domain::{ChatMessage, ConversationPage, ServerConfig};

/// Probes candidate servers and builds clients bound to one endpoint.
#[async_trait]
pub trait BackendConnector: Send + Sync {
    /// Check whether `target.url` answers the health/config endpoint with a
    /// 2xx, sending `target.token` when one is set.
    ///
    /// Must not touch any shared state and must not return an error for
    /// ordinary connectivity failures; those are `false`.
    async fn probe(&self, target: &ServerConfig) -> bool;

    /// Build a client for `config`. Performs no network I/O.
    fn connect(&self, config: &ServerConfig) -> ApiResult<Arc<dyn ConversationApi>>;
}

/// Conversation data operations against one server.
///
/// Implementations map wire formats to domain types. Argument validation
/// and ordering guarantees are handled by `ConversationService`.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Fetch the first (and only driven) page of conversations.
    async fn list_conversations(&self) -> ApiResult<ConversationPage>;

    /// Fetch all messages of a conversation, in server order.
    async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>>;

    /// Post a new user message and return the server-confirmed copy.
    async fn send_message(&self, conversation_id: &str, text: &str) -> ApiResult<ChatMessage>;
}
