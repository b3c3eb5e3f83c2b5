//! Conversation server client bound to one endpoint.

mod conversations;

use ohlink_core::ServerConfig;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::parse_base_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultConversationClient = ConversationClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for one conversation server.
///
/// Generic over the HTTP backend so tests can inject a fake. Use
/// [`DefaultConversationClient`] in production code.
pub struct ConversationClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultConversationClient {
    /// Build a client for `server` using `config`.
    pub fn new(server: &ServerConfig, config: &HttpClientConfig) -> HttpResult<Self> {
        let base_url = parse_base_url(&server.url)?;
        let backend = ReqwestBackend::new(config, server.token.as_deref())?;
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> ConversationClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(base_url: Url, backend: B) -> Self {
        Self { backend, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
