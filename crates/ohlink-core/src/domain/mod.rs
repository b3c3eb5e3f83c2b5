//! Domain types, independent of any transport or storage concern.

pub mod conversation;
pub mod server;

pub use conversation::{
    ChatMessage, Conversation, ConversationPage, MessageSender, sort_chronologically,
};
pub use server::{ServerConfig, UrlError, normalize_server_url};
