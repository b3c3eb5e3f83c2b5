//! `BackendConnector` implementation backed by reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ohlink_core::{ApiResult, BackendConnector, ConversationApi, ServerConfig};
use tracing::{debug, warn};

use crate::client::DefaultConversationClient;
use crate::config::HttpClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::port::{Operation, map_error};
use crate::url::{build_probe_url, parse_base_url};

/// Probes servers and builds reqwest clients for them.
pub struct ReqwestConnector {
    config: HttpClientConfig,
    prober: ReqwestBackend,
}

impl ReqwestConnector {
    /// Create a connector.
    pub fn new(config: HttpClientConfig) -> HttpResult<Self> {
        let prober = ReqwestBackend::new(&config, None)?;
        Ok(Self { config, prober })
    }
}

/// Ask `backend` whether `target` answers its config endpoint with a 2xx,
/// authenticating with the target's token when it has one.
///
/// Any failure, including an unparseable URL, counts as unreachable.
pub(crate) async fn probe_with<B: HttpBackend>(
    backend: &B,
    target: &ServerConfig,
    timeout: Duration,
) -> bool {
    let url = target.url.as_str();
    let base = match parse_base_url(url) {
        Ok(base) => base,
        Err(e) => {
            debug!(%url, error = %e, "Probe skipped, URL does not parse");
            return false;
        }
    };
    let probe_url = build_probe_url(&base);

    let request = backend.get_status(&probe_url, timeout, target.token.as_deref());
    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(status)) => {
            debug!(url = %probe_url, status, "Probe answered");
            (200..300).contains(&status)
        }
        Ok(Err(e)) => {
            warn!(url = %probe_url, error = %e, "Probe failed");
            false
        }
        Err(_) => {
            warn!(url = %probe_url, ?timeout, "Probe timed out");
            false
        }
    }
}

#[async_trait]
impl BackendConnector for ReqwestConnector {
    async fn probe(&self, target: &ServerConfig) -> bool {
        probe_with(&self.prober, target, self.config.probe_timeout).await
    }

    fn connect(&self, config: &ServerConfig) -> ApiResult<Arc<dyn ConversationApi>> {
        let client = DefaultConversationClient::new(config, &self.config)
            .map_err(|e| map_error(e, Operation::Read))?;
        debug!(url = %config.url, authenticated = config.token.is_some(), "Built conversation client");
        Ok(Arc::new(client))
    }
}
