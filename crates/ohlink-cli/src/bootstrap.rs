//! CLI bootstrap - the composition root.
//!
//! The only place where concrete implementations are wired together:
//! - Session store (file, via ohlink-core)
//! - Backend connector (reqwest, via ohlink-http)
//! - Core services (`ConnectionManager`, `ConversationService`)

use std::path::PathBuf;
use std::sync::Arc;

use ohlink_core::{
    ConnectionManager, ConversationService, FileSessionStore, ServerConfig, SessionStore,
};
use ohlink_http::{HttpClientConfig, ReqwestConnector};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Session file override; `None` uses the platform default.
    pub state_file: Option<PathBuf>,
    /// Bearer token for data requests.
    pub token: Option<String>,
    /// HTTP settings for the probe and the data client.
    pub http: HttpClientConfig,
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    connection: Arc<ConnectionManager>,
    conversations: ConversationService,
    token: Option<String>,
}

impl CliContext {
    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn conversations(&self) -> &ConversationService {
        &self.conversations
    }

    pub fn token(&self) -> Option<String> {
        self.token.clone()
    }

    /// Reconnect to the saved server before a data command.
    pub async fn require_session(&self) -> Result<ServerConfig, CliError> {
        self.connection
            .restore(self.token())
            .await?
            .ok_or(CliError::NotConnected)
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let store = match config.state_file {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::at_default_location()?,
    };
    debug!(path = %store.path().display(), "Using session file");
    let store: Arc<dyn SessionStore> = Arc::new(store);

    let connector = ReqwestConnector::new(config.http)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let connection = Arc::new(ConnectionManager::new(Arc::new(connector), store));
    let conversations = ConversationService::new(Arc::clone(&connection));

    Ok(CliContext {
        connection,
        conversations,
        token: config.token,
    })
}
