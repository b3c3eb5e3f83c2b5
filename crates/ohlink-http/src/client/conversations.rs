//! Conversation and message endpoints.

use ohlink_core::{ChatMessage, ConversationPage};

use crate::error::HttpResult;
use crate::http::HttpBackend;
use crate::models::{ApiMessage, ConversationsResponse, MessagesResponse, SendMessageRequest};
use crate::parsing::{to_chat_message, to_chat_messages, to_conversation_page};
use crate::url::{build_conversations_url, build_messages_url};

use super::ConversationClient;

impl<B: HttpBackend> ConversationClient<B> {
    /// Fetch the first page of conversations.
    pub(crate) async fn fetch_conversations(&self) -> HttpResult<ConversationPage> {
        let url = build_conversations_url(&self.base_url);
        let response: ConversationsResponse = self.backend.get_json(&url).await?;
        Ok(to_conversation_page(response))
    }

    /// Fetch messages of a conversation in server order.
    pub(crate) async fn fetch_messages(&self, conversation_id: &str) -> HttpResult<Vec<ChatMessage>> {
        let url = build_messages_url(&self.base_url, conversation_id);
        let response: MessagesResponse = self.backend.get_json(&url).await?;
        to_chat_messages(response.messages)
    }

    /// Post a message and return the server's copy.
    pub(crate) async fn post_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> HttpResult<ChatMessage> {
        let url = build_messages_url(&self.base_url, conversation_id);
        let confirmed: ApiMessage = self
            .backend
            .post_json(&url, &SendMessageRequest { content: text })
            .await?;
        to_chat_message(confirmed)
    }
}
