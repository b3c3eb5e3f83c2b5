//! Session store implementations.
//!
//! [`FileSessionStore`] keeps the last connected server in a small JSON file
//! under the platform config directory. [`MemorySessionStore`] is for
//! embedding and tests.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::{PersistedSession, SessionStore, SessionStoreError};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "OHLINK_CONFIG_DIR";

const APP_DIR: &str = "ohlink";
const SESSION_FILE: &str = "session.json";

/// Resolve the default session file location.
///
/// Resolution order:
/// 1. `OHLINK_CONFIG_DIR` environment variable
/// 2. System config directory (e.g., `~/.config/ohlink`)
pub fn default_session_path() -> Result<PathBuf, SessionStoreError> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir).join(SESSION_FILE));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SESSION_FILE))
        .ok_or(SessionStoreError::NoLocation)
}

/// JSON file backed session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_session_path`].
    pub fn at_default_location() -> Result<Self, SessionStoreError> {
        default_session_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Readers only ever see a complete file.
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), url = %session.url, "Persisted session");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `session` already stored.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.lock().await = None;
        Ok(())
    }
}
