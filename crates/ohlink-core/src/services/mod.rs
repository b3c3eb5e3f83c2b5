//! Application services.
//!
//! Thin orchestrators over the ports: [`ConnectionManager`] owns the active
//! endpoint and [`ConversationService`] performs data access through it.

pub mod connection;
pub mod conversations;

#[cfg(test)]
pub(crate) mod testing;

pub use connection::{ConnectError, ConnectionManager, UNREACHABLE_MESSAGE};
pub use conversations::ConversationService;
