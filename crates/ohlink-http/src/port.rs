//! Port trait implementation for `ConversationClient`.
//!
//! Implements the core-owned `ConversationApi` trait, mapping internal
//! `HttpError`s to core `ApiError`s. Reads map to `Fetch`, the write to
//! `Send`.

use async_trait::async_trait;
use ohlink_core::{ApiError, ApiResult, ChatMessage, ConversationApi, ConversationPage, RequestFailure};

use crate::client::ConversationClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Read,
    Write,
}

impl Operation {
    fn wrap(self, failure: RequestFailure) -> ApiError {
        match self {
            Self::Read => ApiError::Fetch(failure),
            Self::Write => ApiError::Send(failure),
        }
    }
}

/// Convert internal `HttpError` to core `ApiError`.
pub(crate) fn map_error(err: HttpError, operation: Operation) -> ApiError {
    match err {
        HttpError::Status {
            status, message, ..
        } => operation.wrap(RequestFailure::Status { status, message }),
        HttpError::Network(e) => operation.wrap(RequestFailure::NoResponse {
            message: e.to_string(),
        }),
        HttpError::NoResponse { message, .. } => {
            operation.wrap(RequestFailure::NoResponse { message })
        }
        HttpError::JsonParse(e) => ApiError::UnexpectedFormat {
            message: e.to_string(),
        },
        HttpError::InvalidResponse { message } => ApiError::UnexpectedFormat { message },
        HttpError::InvalidUrl(e) => ApiError::InvalidUrl {
            message: e.to_string(),
        },
        HttpError::Configuration { message } => ApiError::InvalidUrl { message },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> ConversationApi for ConversationClient<B> {
    async fn list_conversations(&self) -> ApiResult<ConversationPage> {
        self.fetch_conversations()
            .await
            .map_err(|e| map_error(e, Operation::Read))
    }

    async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>> {
        self.fetch_messages(conversation_id)
            .await
            .map_err(|e| map_error(e, Operation::Read))
    }

    async fn send_message(&self, conversation_id: &str, text: &str) -> ApiResult<ChatMessage> {
        self.post_message(conversation_id, text)
            .await
            .map_err(|e| map_error(e, Operation::Write))
    }
}
