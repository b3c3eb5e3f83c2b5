//! Hand-written fakes for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::{ChatMessage, Conversation, ConversationPage, MessageSender, ServerConfig};
use crate::ports::{
    ApiError, ApiResult, BackendConnector, ConversationApi, PersistedSession, SessionStore,
    SessionStoreError,
};
use crate::store::MemorySessionStore;

/// Shared call counter.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Connector whose probe answers from a fixed set of reachable URLs.
pub struct FakeConnector {
    reachable: HashSet<String>,
    delays: HashMap<String, Duration>,
    probes: CallCounter,
    fail_connect: bool,
    api: Arc<FakeApi>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            reachable: HashSet::new(),
            delays: HashMap::new(),
            probes: CallCounter::default(),
            fail_connect: false,
            api: Arc::new(FakeApi::new()),
        }
    }

    pub fn reachable(mut self, url: &str) -> Self {
        self.reachable.insert(url.to_string());
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn with_api(mut self, api: FakeApi) -> Self {
        self.api = Arc::new(api);
        self
    }

    pub fn probe_counter(&self) -> CallCounter {
        self.probes.clone()
    }
}

#[async_trait]
impl BackendConnector for FakeConnector {
    async fn probe(&self, target: &ServerConfig) -> bool {
        self.probes.bump();
        if let Some(delay) = self.delays.get(&target.url) {
            tokio::time::sleep(*delay).await;
        }
        self.reachable.contains(&target.url)
    }

    fn connect(&self, config: &ServerConfig) -> ApiResult<Arc<dyn ConversationApi>> {
        if self.fail_connect {
            return Err(ApiError::InvalidUrl {
                message: format!("cannot use {}", config.url),
            });
        }
        let api: Arc<dyn ConversationApi> = self.api.clone();
        Ok(api)
    }
}

/// Conversation API returning canned data.
pub struct FakeApi {
    page: ConversationPage,
    messages: Vec<ChatMessage>,
    send_error: Mutex<Option<ApiError>>,
    calls: CallCounter,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            page: ConversationPage::default(),
            messages: Vec::new(),
            send_error: Mutex::new(None),
            calls: CallCounter::default(),
        }
    }

    pub fn with_conversations(mut self, ids: &[&str]) -> Self {
        self.page.results = ids
            .iter()
            .map(|id| Conversation {
                conversation_id: (*id).to_string(),
                title: format!("Conversation {id}"),
                last_updated_at: "2025-01-01T00:00:00Z".to_string(),
                status: None,
            })
            .collect();
        self
    }

    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn failing_send(self, error: ApiError) -> Self {
        *self.send_error.lock().unwrap() = Some(error);
        self
    }

    pub fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl ConversationApi for FakeApi {
    async fn list_conversations(&self) -> ApiResult<ConversationPage> {
        self.calls.bump();
        Ok(self.page.clone())
    }

    async fn list_messages(&self, _conversation_id: &str) -> ApiResult<Vec<ChatMessage>> {
        self.calls.bump();
        Ok(self.messages.clone())
    }

    async fn send_message(&self, _conversation_id: &str, text: &str) -> ApiResult<ChatMessage> {
        self.calls.bump();
        if let Some(error) = self.send_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(ChatMessage {
            id: "server-1".to_string(),
            text: text.to_string(),
            sender: MessageSender::User,
            timestamp: at(1_000),
        })
    }
}

pub fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn message(id: &str, sender: MessageSender, secs: i64) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        text: format!("message {id}"),
        sender,
        timestamp: at(secs),
    }
}

/// In-memory store whose `save` takes `delay` to complete.
pub struct SlowSaveStore {
    inner: MemorySessionStore,
    delay: Duration,
}

impl SlowSaveStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemorySessionStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl SessionStore for SlowSaveStore {
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError> {
        self.inner.load().await
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(session).await
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.inner.clear().await
    }
}
