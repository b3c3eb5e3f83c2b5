//! Core of ohlink: session lifecycle and conversation data access for a
//! remote conversation server.
//!
//! This crate holds domain types, state containers, port traits and the
//! services built on them. It has no HTTP dependency; the reqwest adapter
//! lives in `ohlink-http` and is injected through [`BackendConnector`].
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    ChatMessage, Conversation, ConversationPage, MessageSender, ServerConfig, UrlError,
    normalize_server_url, sort_chronologically,
};
pub use ports::{
    ApiError, ApiResult, BackendConnector, ConversationApi, PersistedSession, RequestFailure,
    SessionStore, SessionStoreError,
};
pub use services::{ConnectError, ConnectionManager, ConversationService, UNREACHABLE_MESSAGE};
pub use state::{
    ConversationListState, FetchStatus, MessageList, ProvisionalId, SessionPhase, SessionState,
};
pub use store::{FileSessionStore, MemorySessionStore, default_session_path};

// Silence unused dev-dependency warnings; mockall is used by integration tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
