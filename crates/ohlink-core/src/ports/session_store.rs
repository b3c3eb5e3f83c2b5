//! Persistence port for the last connected server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What survives a process restart.
///
/// Only the base URL is kept; tokens are supplied again on each start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub url: String,
    pub saved_at: DateTime<Utc>,
}

impl PersistedSession {
    /// Record `url` as saved now.
    pub fn now(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            saved_at: Utc::now(),
        }
    }
}

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No location available for the session file")]
    NoLocation,
}

/// Storage for the last successfully connected server.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, `None` when nothing was saved.
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError>;

    /// Persist `session`, replacing any previous one.
    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError>;

    /// Forget the persisted session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
