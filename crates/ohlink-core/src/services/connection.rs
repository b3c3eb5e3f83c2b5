//! Connection manager: owns the single active server endpoint.
//!
//! The manager is an ordinary value, created by the composition root and
//! shared through `Arc`. It holds the current client and the session state
//! behind one lock so readers never observe one without the other.
//!
//! Concurrent connects are resolved latest-wins: every attempt takes a
//! token from a generation counter, and an attempt may only commit while
//! its token is still the newest. A slow probe that finishes after a newer
//! attempt started is dropped instead of overwriting the newer client.
//!
//! Writes to the session store are serialized with commits and resets, so
//! the persisted URL always follows the last committed change.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::{ServerConfig, UrlError, normalize_server_url};
use crate::ports::{
    ApiError, ApiResult, BackendConnector, ConversationApi, PersistedSession, SessionStore,
    SessionStoreError,
};
use crate::state::SessionState;

/// Error text recorded in the session when the probe fails.
pub const UNREACHABLE_MESSAGE: &str = "Could not connect to the server. Please check the URL.";

/// Errors from [`ConnectionManager::connect`] and [`ConnectionManager::restore`].
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The URL could not be normalized. Session state is untouched.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The health probe failed.
    #[error("Server at {url} is unreachable")]
    Unreachable { url: String },

    /// The adapter could not build a client for the endpoint.
    #[error("Connection error: {0}")]
    Client(#[from] ApiError),

    /// A newer connect or a disconnect happened while this attempt was in
    /// flight; nothing was committed.
    #[error("Connection attempt was superseded by a newer one")]
    Superseded,

    /// Reading the persisted session failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Ticket identifying one connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AttemptToken(u64);

struct ActiveClient {
    config: ServerConfig,
    api: Arc<dyn ConversationApi>,
}

#[derive(Default)]
struct Inner {
    client: Option<ActiveClient>,
    session: SessionState,
}

/// Owns the active endpoint, its client and the session record.
pub struct ConnectionManager {
    connector: Arc<dyn BackendConnector>,
    store: Arc<dyn SessionStore>,
    generation: AtomicU64,
    inner: RwLock<Inner>,
    /// Held from commit or reset until the matching store write finishes.
    /// Always taken before `inner`.
    persist: Mutex<()>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn BackendConnector>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            connector,
            store,
            generation: AtomicU64::new(0),
            inner: RwLock::new(Inner::default()),
            persist: Mutex::new(()),
        }
    }

    /// Probe `candidate_url` without touching any state.
    ///
    /// The URL is expected to be normalized already. Blank input returns
    /// `false` without any network call. No token is sent.
    pub async fn probe_connection(&self, candidate_url: &str) -> bool {
        self.probe_target(&ServerConfig::new(candidate_url)).await
    }

    async fn probe_target(&self, target: &ServerConfig) -> bool {
        if target.url.trim().is_empty() {
            debug!("Skipping probe of blank server URL");
            return false;
        }

        debug!(url = %target.url, authenticated = target.token.is_some(), "Probing server");
        let reachable = self.connector.probe(target).await;
        if reachable {
            debug!(url = %target.url, "Probe succeeded");
        } else {
            warn!(url = %target.url, "Probe failed");
        }
        reachable
    }

    /// Install a client for `config` as the current one.
    ///
    /// Callers should probe first. This supersedes any connect attempt
    /// still in flight, and the session moves to connected on `config` so
    /// it always describes the installed client. Nothing is persisted.
    pub async fn initialize_client(&self, config: ServerConfig) -> ApiResult<()> {
        let api = self.connector.connect(&config)?;

        let mut inner = self.inner.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        info!(url = %config.url, "Initialized API client");
        inner.session.connect_success(config.clone());
        inner.client = Some(ActiveClient { config, api });
        Ok(())
    }

    /// Full connect flow for a user-entered URL.
    ///
    /// Normalizes, probes, installs the client, persists the URL and moves
    /// the session to connected. On probe failure the session returns to
    /// idle with an error and the previously installed client (if any) is
    /// left in place.
    pub async fn connect(
        &self,
        raw_url: &str,
        token: Option<String>,
    ) -> Result<ServerConfig, ConnectError> {
        let url = normalize_server_url(raw_url)?;

        let attempt = {
            let mut inner = self.inner.write().await;
            inner.session.connect_start();
            self.begin_attempt()
        };
        info!(url = %url, "Connecting to server");

        let config = ServerConfig::new(url).with_token(token);
        if !self.probe_target(&config).await {
            self.fail_if_current(attempt, UNREACHABLE_MESSAGE).await?;
            return Err(ConnectError::Unreachable { url: config.url });
        }

        let api = match self.connector.connect(&config) {
            Ok(api) => api,
            Err(e) => {
                self.fail_if_current(attempt, format!("Connection error: {e}"))
                    .await?;
                return Err(e.into());
            }
        };

        let _persist = self.persist.lock().await;
        {
            let mut inner = self.inner.write().await;
            if !self.is_current(attempt) {
                debug!(url = %config.url, "Dropping superseded connect attempt");
                return Err(ConnectError::Superseded);
            }
            inner.client = Some(ActiveClient {
                config: config.clone(),
                api,
            });
            inner.session.connect_success(config.clone());
        }
        info!(url = %config.url, "Connected to server");

        if let Err(e) = self.store.save(&PersistedSession::now(&config.url)).await {
            warn!(error = %e, "Failed to persist session");
        }

        Ok(config)
    }

    /// Reconnect to the persisted server, if one was saved.
    pub async fn restore(
        &self,
        token: Option<String>,
    ) -> Result<Option<ServerConfig>, ConnectError> {
        let Some(saved) = self.store.load().await? else {
            debug!("No persisted session to restore");
            return Ok(None);
        };

        info!(url = %saved.url, saved_at = %saved.saved_at, "Restoring persisted session");
        self.connect(&saved.url, token).await.map(Some)
    }

    /// Drop the client, reset the session and forget the persisted URL.
    ///
    /// Any connect attempt still in flight will not commit.
    pub async fn disconnect(&self) {
        let _persist = self.persist.lock().await;
        {
            let mut inner = self.inner.write().await;
            self.begin_attempt();
            inner.client = None;
            inner.session.disconnect();
        }
        info!("Disconnected from server");

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted session");
        }
    }

    /// Snapshot of the session record.
    pub async fn session(&self) -> SessionState {
        self.inner.read().await.session.clone()
    }

    /// Config of the installed client, if any.
    pub async fn active_config(&self) -> Option<ServerConfig> {
        self.inner
            .read()
            .await
            .client
            .as_ref()
            .map(|c| c.config.clone())
    }

    /// The installed client, or [`ApiError::NotInitialized`].
    pub async fn current_client(&self) -> ApiResult<Arc<dyn ConversationApi>> {
        self.inner
            .read()
            .await
            .client
            .as_ref()
            .map(|c| Arc::clone(&c.api))
            .ok_or(ApiError::NotInitialized)
    }

    fn begin_attempt(&self) -> AttemptToken {
        AttemptToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, attempt: AttemptToken) -> bool {
        self.generation.load(Ordering::SeqCst) == attempt.0
    }

    /// Record a failed attempt unless a newer one owns the session.
    async fn fail_if_current(
        &self,
        attempt: AttemptToken,
        message: impl Into<String>,
    ) -> Result<(), ConnectError> {
        let mut inner = self.inner.write().await;
        if !self.is_current(attempt) {
            return Err(ConnectError::Superseded);
        }
        inner.session.connect_failure(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FakeApi, FakeConnector, SlowSaveStore};
    use crate::store::MemorySessionStore;
    use std::time::Duration;

    fn manager(connector: FakeConnector) -> (ConnectionManager, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let manager = ConnectionManager::new(Arc::new(connector), store.clone());
        (manager, store)
    }

    #[tokio::test]
    async fn test_blank_probe_makes_no_network_call() {
        let connector = FakeConnector::new().reachable("http://ok.example.com");
        let probes = connector.probe_counter();
        let (manager, _) = manager(connector);

        assert!(!manager.probe_connection("").await);
        assert!(!manager.probe_connection("   ").await);
        assert_eq!(probes.get(), 0);
    }

    #[tokio::test]
    async fn test_probe_does_not_touch_session() {
        let (manager, _) = manager(FakeConnector::new().reachable("http://ok.example.com"));
        manager.connect("ok.example.com", None).await.unwrap();
        let before = manager.session().await;

        assert!(!manager.probe_connection("http://fail.example.com").await);

        assert_eq!(manager.session().await, before);
        assert_eq!(
            manager.active_config().await.unwrap().url,
            "http://ok.example.com"
        );
    }

    #[tokio::test]
    async fn test_connect_success() {
        let (manager, store) = manager(FakeConnector::new().reachable("http://test-server.com"));

        let config = manager
            .connect(" test-server.com/ ", Some("secret".to_string()))
            .await
            .unwrap();

        assert_eq!(config.url, "http://test-server.com");
        assert_eq!(config.token.as_deref(), Some("secret"));

        let session = manager.session().await;
        assert!(session.is_connected);
        assert!(!session.is_connecting);
        assert!(session.error.is_none());
        assert_eq!(session.server_config, Some(config));

        assert!(manager.current_client().await.is_ok());
        assert_eq!(
            store.load().await.unwrap().unwrap().url,
            "http://test-server.com"
        );
    }

    #[tokio::test]
    async fn test_connect_failure_sets_error() {
        let (manager, store) = manager(FakeConnector::new());

        let err = manager
            .connect("http://fail.example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Unreachable { .. }));

        let session = manager.session().await;
        assert!(!session.is_connecting);
        assert!(!session.is_connected);
        assert!(!session.error.unwrap_or_default().is_empty());
        assert!(matches!(
            manager.current_client().await,
            Err(ApiError::NotInitialized)
        ));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_reconnect_keeps_previous_client() {
        let (manager, _) = manager(FakeConnector::new().reachable("http://ok.example.com"));
        manager.connect("ok.example.com", None).await.unwrap();

        assert!(manager.connect("fail.example.com", None).await.is_err());

        assert_eq!(
            manager.active_config().await.unwrap().url,
            "http://ok.example.com"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_leaves_session_untouched() {
        let (manager, _) = manager(FakeConnector::new());
        let err = manager.connect("   ", None).await.unwrap_err();
        assert!(matches!(err, ConnectError::InvalidUrl(UrlError::Empty)));
        assert_eq!(manager.session().await, SessionState::default());
    }

    #[tokio::test]
    async fn test_disconnect_resets_everything() {
        let (manager, store) = manager(FakeConnector::new().reachable("http://ok.example.com"));
        manager.connect("ok.example.com", None).await.unwrap();

        manager.disconnect().await;

        let session = manager.session().await;
        assert!(!session.is_connected);
        assert!(session.server_config.is_none());
        assert!(manager.active_config().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_connect_wins() {
        let connector = FakeConnector::new()
            .reachable("http://slow.example.com")
            .reachable("http://fast.example.com")
            .with_delay("http://slow.example.com", Duration::from_millis(50));
        let (manager, _) = manager(connector);

        let (slow, fast) = tokio::join!(
            manager.connect("slow.example.com", None),
            manager.connect("fast.example.com", None),
        );

        assert!(matches!(slow, Err(ConnectError::Superseded)));
        assert_eq!(fast.unwrap().url, "http://fast.example.com");
        assert_eq!(
            manager.active_config().await.unwrap().url,
            "http://fast.example.com"
        );
        assert!(manager.session().await.is_connected);
    }

    #[tokio::test]
    async fn test_disconnect_cancels_in_flight_connect() {
        let connector = FakeConnector::new()
            .reachable("http://slow.example.com")
            .with_delay("http://slow.example.com", Duration::from_millis(50));
        let (manager, _) = manager(connector);

        let (result, ()) = tokio::join!(manager.connect("slow.example.com", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            manager.disconnect().await;
        });

        assert!(matches!(result, Err(ConnectError::Superseded)));
        assert!(manager.active_config().await.is_none());
        assert!(!manager.session().await.is_connected);
    }

    #[tokio::test]
    async fn test_initialize_client_replaces_current() {
        let (manager, _) = manager(FakeConnector::new());
        manager
            .initialize_client(ServerConfig::new("http://a"))
            .await
            .unwrap();
        manager
            .initialize_client(ServerConfig::new("http://b"))
            .await
            .unwrap();

        assert_eq!(manager.active_config().await.unwrap().url, "http://b");
    }

    #[tokio::test]
    async fn test_initialize_client_during_connect_settles_session() {
        let connector = FakeConnector::new()
            .reachable("http://slow.example.com")
            .with_delay("http://slow.example.com", Duration::from_millis(50));
        let (manager, _) = manager(connector);

        let (result, initialized) = tokio::join!(manager.connect("slow.example.com", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            manager.initialize_client(ServerConfig::new("http://b")).await
        });

        assert!(matches!(result, Err(ConnectError::Superseded)));
        initialized.unwrap();

        let session = manager.session().await;
        assert!(!session.is_connecting);
        assert!(session.is_connected);
        assert_eq!(session.server_url(), Some("http://b"));
        assert_eq!(manager.active_config().await.unwrap().url, "http://b");
    }

    fn slow_save_manager(connector: FakeConnector) -> (ConnectionManager, Arc<SlowSaveStore>) {
        let store = Arc::new(SlowSaveStore::new(Duration::from_millis(50)));
        let manager = ConnectionManager::new(Arc::new(connector), store.clone());
        (manager, store)
    }

    #[tokio::test]
    async fn test_disconnect_during_save_leaves_nothing_persisted() {
        let (manager, store) =
            slow_save_manager(FakeConnector::new().reachable("http://ok.example.com"));

        let (result, ()) = tokio::join!(manager.connect("ok.example.com", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            manager.disconnect().await;
        });

        assert_eq!(result.unwrap().url, "http://ok.example.com");
        assert!(!manager.session().await.is_connected);
        assert!(manager.active_config().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persisted_url_follows_last_commit() {
        let connector = FakeConnector::new()
            .reachable("http://a.example.com")
            .reachable("http://b.example.com");
        let (manager, store) = slow_save_manager(connector);

        let (a, b) = tokio::join!(manager.connect("a.example.com", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            manager.connect("b.example.com", None).await
        });

        a.unwrap();
        b.unwrap();
        let active = manager.active_config().await.unwrap().url;
        assert_eq!(active, "http://b.example.com");
        assert_eq!(store.load().await.unwrap().unwrap().url, active);
    }

    #[tokio::test]
    async fn test_connector_error_is_reported() {
        let connector = FakeConnector::new()
            .reachable("http://bad.example.com")
            .failing_connect();
        let (manager, _) = manager(connector);

        let err = manager.connect("bad.example.com", None).await.unwrap_err();
        assert!(matches!(err, ConnectError::Client(ApiError::InvalidUrl { .. })));

        let session = manager.session().await;
        assert!(session.error.unwrap().starts_with("Connection error"));
    }

    #[tokio::test]
    async fn test_restore_reconnects_to_saved_url() {
        let store = Arc::new(MemorySessionStore::with_session(PersistedSession::now(
            "http://saved.example.com",
        )));
        let manager = ConnectionManager::new(
            Arc::new(FakeConnector::new().reachable("http://saved.example.com")),
            store,
        );

        let restored = manager.restore(None).await.unwrap();
        assert_eq!(restored.unwrap().url, "http://saved.example.com");
        assert!(manager.session().await.is_connected);
    }

    #[tokio::test]
    async fn test_restore_without_saved_session() {
        let (manager, _) = manager(FakeConnector::new());
        assert!(manager.restore(None).await.unwrap().is_none());
        assert!(!manager.session().await.is_connecting);
    }

    #[tokio::test]
    async fn test_current_client_before_connect() {
        let (manager, _) = manager(FakeConnector::new().with_api(FakeApi::new()));
        assert!(matches!(
            manager.current_client().await,
            Err(ApiError::NotInitialized)
        ));
    }
}
