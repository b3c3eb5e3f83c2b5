//! HTTP backend abstraction.
//!
//! A trait-based backend keeps the client testable: production uses
//! reqwest, tests use [`testing::FakeBackend`] with canned responses.
//! No request is ever retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::models::ErrorBody;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the server.
///
/// This is an implementation detail - external code should use the
/// `ConversationApi` and `BackendConnector` ports.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Issue a GET with a custom timeout and return only the status code.
    ///
    /// `bearer` is sent as `Authorization: Bearer <token>` for this request
    /// only.
    async fn get_status(
        &self,
        url: &Url,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> HttpResult<u16>;

    /// GET `url` and deserialize a 2xx JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;

    /// POST `body` as JSON to `url` and deserialize a 2xx JSON body.
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &B,
    ) -> HttpResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Every request carries `Content-Type: application/json`, plus
/// `Authorization: Bearer <token>` when a token is configured.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend, optionally authenticating with `token`.
    pub fn new(config: &HttpClientConfig, token: Option<&str>) -> HttpResult<Self> {
        let headers = default_headers(token)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Turn a response into its body, or an error carrying status and message.
    async fn read_success_body(response: reqwest::Response) -> HttpResult<Vec<u8>> {
        let status = response.status();
        let url = response.url().to_string();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                debug!(status = status.as_u16(), %url, error = %e, "Error body unreadable");
                return Err(HttpError::Status {
                    status: status.as_u16(),
                    url,
                    message: None,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = ErrorBody::message_from(&body);
        debug!(status = status.as_u16(), %url, ?message, "Server returned error status");
        Err(HttpError::Status {
            status: status.as_u16(),
            url,
            message,
        })
    }
}

fn default_headers(token: Option<&str>) -> HttpResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            HttpError::Configuration {
                message: format!("token is not a valid header value: {e}"),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_status(
        &self,
        url: &Url,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> HttpResult<u16> {
        let mut request = self.client.get(url.as_str()).timeout(timeout);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Ok(response.status().as_u16())
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        debug!(%url, "GET");
        let response = self.client.get(url.as_str()).send().await?;
        let body = Self::read_success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &B,
    ) -> HttpResult<T> {
        debug!(%url, "POST");
        let payload = serde_json::to_vec(body)?;
        let response = self.client.post(url.as_str()).body(payload).send().await?;
        let body = Self::read_success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
