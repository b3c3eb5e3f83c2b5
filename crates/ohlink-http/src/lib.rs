#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultConversationClient is used through the ConversationApi port, not
// its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod connector;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultConversationClient;

// Connector
pub use connector::ReqwestConnector;

// Configuration
pub use config::HttpClientConfig;

// Errors
pub use error::{HttpError, HttpResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
