//! Session state: which server is active and how the last connect went.

use serde::{Deserialize, Serialize};

use crate::domain::ServerConfig;

/// Coarse lifecycle phase derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Connecting,
    Connected,
}

/// Connection session record.
///
/// Lifecycle is `idle -> connecting -> (connected | idle+error)` and
/// `connected -> idle` on disconnect. A failed connect returns to a
/// reconnectable idle carrying the error text rather than a terminal state.
///
/// Invariants kept by every transition:
/// - `is_connected` and `is_connecting` are never both true;
/// - `server_config` is `Some` iff `is_connected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_connected: bool,
    pub is_connecting: bool,
    pub server_config: Option<ServerConfig>,
    pub error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_start(&mut self) {
        self.is_connecting = true;
        self.is_connected = false;
        self.server_config = None;
        self.error = None;
    }

    pub fn connect_success(&mut self, config: ServerConfig) {
        self.is_connecting = false;
        self.is_connected = true;
        self.server_config = Some(config);
        self.error = None;
    }

    pub fn connect_failure(&mut self, message: impl Into<String>) {
        self.is_connecting = false;
        self.is_connected = false;
        self.server_config = None;
        self.error = Some(message.into());
    }

    pub fn disconnect(&mut self) {
        self.is_connecting = false;
        self.is_connected = false;
        self.server_config = None;
        self.error = None;
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.is_connecting {
            SessionPhase::Connecting
        } else if self.is_connected {
            SessionPhase::Connected
        } else {
            SessionPhase::Idle
        }
    }

    /// URL of the active server, if connected.
    pub fn server_url(&self) -> Option<&str> {
        self.server_config.as_ref().map(|c| c.url.as_str())
    }
}
