//! Conversation data access through the currently installed client.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{ChatMessage, Conversation, ConversationPage, sort_chronologically};
use crate::ports::{ApiError, ApiResult};
use crate::services::connection::ConnectionManager;
use crate::state::{ConversationListState, MessageList};

/// Reads and writes conversation data.
///
/// Every call resolves the current client from the [`ConnectionManager`]
/// first, so calls fail with [`ApiError::NotInitialized`] before any network
/// I/O when nothing is connected. Nothing is retried.
pub struct ConversationService {
    connection: Arc<ConnectionManager>,
}

impl ConversationService {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    /// List conversations in server order.
    pub async fn list_conversations(&self) -> ApiResult<Vec<Conversation>> {
        self.list_conversations_page().await.map(|page| page.results)
    }

    /// List conversations, keeping the server's `next_page_id`.
    pub async fn list_conversations_page(&self) -> ApiResult<ConversationPage> {
        let api = self.connection.current_client().await?;
        let page = api.list_conversations().await?;
        debug!(count = page.results.len(), "Fetched conversations");
        Ok(page)
    }

    /// List messages of a conversation, ascending by timestamp.
    pub async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>> {
        require_non_empty(conversation_id, "conversation_id")?;

        let api = self.connection.current_client().await?;
        let mut messages = api.list_messages(conversation_id).await?;
        sort_chronologically(&mut messages);

        debug!(conversation_id, count = messages.len(), "Fetched messages");
        Ok(messages)
    }

    /// Send a message and return the server-confirmed copy.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> ApiResult<ChatMessage> {
        require_non_empty(conversation_id, "conversation_id")?;
        require_non_empty(text, "text")?;

        let api = self.connection.current_client().await?;
        let confirmed = api.send_message(conversation_id, text).await?;
        debug!(conversation_id, message_id = %confirmed.id, "Message sent");
        Ok(confirmed)
    }

    /// Fetch conversations into `state`, driving its request status.
    pub async fn refresh_conversations(
        &self,
        state: &mut ConversationListState,
    ) -> ApiResult<()> {
        state.fetch_start();
        match self.list_conversations().await {
            Ok(conversations) => {
                state.fetch_succeeded(conversations);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch conversations");
                state.fetch_failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Fetch messages into `list`, replacing its contents.
    pub async fn refresh_messages(
        &self,
        list: &mut MessageList,
        conversation_id: &str,
    ) -> ApiResult<()> {
        let messages = self.list_messages(conversation_id).await?;
        list.replace_all(messages);
        Ok(())
    }

    /// Optimistic send: show a provisional entry, then confirm or discard it.
    ///
    /// Arguments are validated before anything is inserted, so invalid input
    /// leaves `list` untouched.
    pub async fn send_with_reconciliation(
        &self,
        list: &mut MessageList,
        conversation_id: &str,
        text: &str,
    ) -> ApiResult<ChatMessage> {
        require_non_empty(conversation_id, "conversation_id")?;
        require_non_empty(text, "text")?;

        let provisional = list.insert_provisional(text, Utc::now());
        match self.send_message(conversation_id, text).await {
            Ok(confirmed) => {
                list.confirm(&provisional, confirmed.clone());
                Ok(confirmed)
            }
            Err(e) => {
                warn!(conversation_id, error = %e, "Send failed, discarding provisional message");
                list.discard(&provisional);
                Err(e)
            }
        }
    }
}

fn require_non_empty(value: &str, field: &'static str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidArgument { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageSender;
    use crate::ports::RequestFailure;
    use crate::services::testing::{FakeApi, FakeConnector, message};
    use crate::state::FetchStatus;
    use crate::store::MemorySessionStore;

    const URL: &str = "http://test-server.com";

    async fn connected(api: FakeApi) -> ConversationService {
        let connector = FakeConnector::new().reachable(URL).with_api(api);
        let connection = Arc::new(ConnectionManager::new(
            Arc::new(connector),
            Arc::new(MemorySessionStore::new()),
        ));
        connection.connect(URL, None).await.unwrap();
        ConversationService::new(connection)
    }

    fn disconnected() -> ConversationService {
        ConversationService::new(Arc::new(ConnectionManager::new(
            Arc::new(FakeConnector::new()),
            Arc::new(MemorySessionStore::new()),
        )))
    }

    #[tokio::test]
    async fn test_list_conversations_requires_client() {
        let service = disconnected();
        assert_eq!(
            service.list_conversations().await,
            Err(ApiError::NotInitialized)
        );
    }

    #[tokio::test]
    async fn test_list_conversations_keeps_server_order() {
        let service = connected(FakeApi::new().with_conversations(&["b", "a", "c"])).await;
        let ids: Vec<_> = service
            .list_conversations()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.conversation_id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_list_messages_sorted_ascending() {
        let api = FakeApi::new().with_messages(vec![
            message("3", MessageSender::Bot, 300),
            message("1", MessageSender::User, 100),
            message("2", MessageSender::Bot, 200),
        ]);
        let service = connected(api).await;

        let messages = service.list_messages("conv").await.unwrap();
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_list_messages_rejects_empty_id() {
        let api = FakeApi::new();
        let calls = api.call_counter();
        let service = connected(api).await;

        assert_eq!(
            service.list_messages("").await,
            Err(ApiError::InvalidArgument {
                field: "conversation_id"
            })
        );
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_send_empty_text_makes_no_call() {
        let api = FakeApi::new();
        let calls = api.call_counter();
        let service = connected(api).await;

        assert_eq!(
            service.send_message("conv", "").await,
            Err(ApiError::InvalidArgument { field: "text" })
        );
        assert_eq!(
            service.send_message("conv", "  \n").await,
            Err(ApiError::InvalidArgument { field: "text" })
        );
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_send_validates_before_checking_client() {
        let service = disconnected();
        assert_eq!(
            service.send_message("", "hi").await,
            Err(ApiError::InvalidArgument {
                field: "conversation_id"
            })
        );
    }

    #[tokio::test]
    async fn test_refresh_conversations_success() {
        let service = connected(FakeApi::new().with_conversations(&["a", "b"])).await;
        let mut state = ConversationListState::new();

        service.refresh_conversations(&mut state).await.unwrap();

        assert_eq!(state.status, FetchStatus::Succeeded);
        assert_eq!(state.conversations.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_conversations_failure() {
        let service = disconnected();
        let mut state = ConversationListState::new();

        assert!(service.refresh_conversations(&mut state).await.is_err());
        assert_eq!(state.status, FetchStatus::Failed);
        assert!(state.error.unwrap().contains("not initialized"));
    }

    #[tokio::test]
    async fn test_send_with_reconciliation_confirms() {
        let service = connected(FakeApi::new()).await;
        let mut list = MessageList::new();

        let confirmed = service
            .send_with_reconciliation(&mut list, "conv", "hello")
            .await
            .unwrap();

        assert_eq!(confirmed.id, "server-1");
        assert_eq!(list.len(), 1);
        assert_eq!(list.messages()[0].id, "server-1");
    }

    #[tokio::test]
    async fn test_send_with_reconciliation_discards_on_failure() {
        let api = FakeApi::new().failing_send(ApiError::Send(RequestFailure::NoResponse {
            message: "timed out".to_string(),
        }));
        let service = connected(api).await;
        let mut list = MessageList::new();
        list.replace_all(vec![message("1", MessageSender::Bot, 10)]);

        let err = service
            .send_with_reconciliation(&mut list, "conv", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Send(RequestFailure::NoResponse { .. })));
        assert_eq!(list.len(), 1);
        assert_eq!(list.messages()[0].id, "1");
    }

    #[tokio::test]
    async fn test_send_with_reconciliation_invalid_input_leaves_list() {
        let service = connected(FakeApi::new()).await;
        let mut list = MessageList::new();

        assert!(
            service
                .send_with_reconciliation(&mut list, "conv", "")
                .await
                .is_err()
        );
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_messages_replaces_list() {
        let api = FakeApi::new().with_messages(vec![
            message("2", MessageSender::Bot, 20),
            message("1", MessageSender::User, 10),
        ]);
        let service = connected(api).await;
        let mut list = MessageList::new();
        list.insert_provisional("stale", Utc::now());

        service.refresh_messages(&mut list, "conv").await.unwrap();

        let ids: Vec<_> = list.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
