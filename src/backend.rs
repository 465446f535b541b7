//! Backend API client.
//!
//! Typed calls against the orchestration backend over an injected
//! [`HttpClient`]. Non-2xx responses become [`ProtocolError::HttpStatus`]
//! with the body's `detail`/`message` when it has one.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{NetworkError, ProtocolError, SuperegoResult};
use crate::models::{KeySetRequest, ProvidersModels, ThreadCacheData, ThreadStatus};
use crate::traits::{json_headers, Headers, HttpClient, ProvidersSource, Response, ThreadFetcher};

/// Body of `GET {base}/threads/{id}/state`.
#[derive(Debug, Deserialize)]
struct ThreadStateResponse {
    #[serde(default)]
    status: ThreadStatus,
    #[serde(default)]
    values: serde_json::Value,
}

/// Error body shape shared by backend endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the orchestration backend.
#[derive(Clone)]
pub struct BackendClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
}

impl BackendClient {
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the latest state of one thread.
    pub async fn fetch_thread_state(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData> {
        let url = self.config.thread_state_url(thread_id);
        let response = self.get(&url).await?;
        let body: ThreadStateResponse = parse_success(&response)?;
        debug!(thread_id, status = ?body.status, "Fetched thread state");
        Ok(ThreadCacheData::new(thread_id, body.status, body.values))
    }

    /// Fetch the provider → models directory.
    pub async fn fetch_models(&self) -> SuperegoResult<ProvidersModels> {
        let url = self.config.models_url();
        let response = self.get(&url).await?;
        parse_success(&response)
    }

    /// `POST {base}/key/set`. Returns the raw response whatever its status;
    /// interpreting it is the caller's job.
    pub async fn post_key_set(&self, request: &KeySetRequest) -> Result<Response, NetworkError> {
        let url = self.config.key_set_url();
        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: e.to_string(),
        })?;
        self.http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))
    }

    async fn get(&self, url: &str) -> Result<Response, NetworkError> {
        self.http
            .get(url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, url))
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

/// Turn a non-2xx response into [`ProtocolError::HttpStatus`], otherwise
/// parse the JSON body.
fn parse_success<T: serde::de::DeserializeOwned>(response: &Response) -> SuperegoResult<T> {
    if !response.is_success() {
        let body: ErrorBody = response.json().unwrap_or_default();
        return Err(ProtocolError::HttpStatus {
            status: response.status,
            detail: body.detail.or(body.message),
        }
        .into());
    }
    response.json().map_err(|e| {
        ProtocolError::InvalidResponse {
            message: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl ThreadFetcher for BackendClient {
    async fn fetch_thread(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData> {
        self.fetch_thread_state(thread_id).await
    }
}

#[async_trait]
impl ProvidersSource for BackendClient {
    async fn fetch_providers_models(&self) -> SuperegoResult<ProvidersModels> {
        self.fetch_models().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::SuperegoError;
    use crate::traits::HttpError;

    fn client(http: &MockHttpClient) -> BackendClient {
        BackendClient::new(ClientConfig::new(), Arc::new(http.clone()))
    }

    #[tokio::test]
    async fn test_fetch_models() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://localhost:8000/api/models",
            MockResponse::json(
                200,
                serde_json::json!({"openai": ["gpt-4o", "gpt-4o-mini"], "anthropic": []}),
            ),
        );

        let models = client(&http).fetch_models().await.unwrap();
        assert_eq!(models["openai"], vec!["gpt-4o", "gpt-4o-mini"]);
        assert!(models["anthropic"].is_empty());
    }

    #[tokio::test]
    async fn test_fetch_models_server_error_detail() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://localhost:8000/api/models",
            MockResponse::json(503, serde_json::json!({"detail": "warming up"})),
        );

        let err = client(&http).fetch_models().await.unwrap_err();
        assert_eq!(
            err,
            SuperegoError::Protocol(ProtocolError::HttpStatus {
                status: 503,
                detail: Some("warming up".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_models_wrong_shape() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://localhost:8000/api/models",
            MockResponse::json(200, serde_json::json!(["openai"])),
        );

        let err = client(&http).fetch_models().await.unwrap_err();
        assert!(matches!(
            err,
            SuperegoError::Protocol(ProtocolError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_thread_state() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://localhost:8000/api/threads/t-1/state",
            MockResponse::json(
                200,
                serde_json::json!({"status": "busy", "values": {"messages": []}}),
            ),
        );

        let data = client(&http).fetch_thread_state("t-1").await.unwrap();
        assert_eq!(data.thread_id, "t-1");
        assert_eq!(data.status, ThreadStatus::Busy);
        assert_eq!(data.values, serde_json::json!({"messages": []}));
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_network() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::Timeout("30s".to_string())));

        let err = client(&http).fetch_thread_state("t-1").await.unwrap_err();
        assert!(matches!(
            err,
            SuperegoError::Network(NetworkError::Timeout { ref url, .. })
                if url == "http://localhost:8000/api/threads/t-1/state"
        ));
    }

    #[tokio::test]
    async fn test_post_key_set_sends_json() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, serde_json::json!({"status": "ok"})));

        let request = KeySetRequest {
            provider: "openai".to_string(),
            encrypted_key: "enc".to_string(),
            session_id: "s-1".to_string(),
        };
        let response = client(&http).post_key_set(&request).await.unwrap();
        assert_eq!(response.status, 200);

        let recorded = &http.get_requests()[0];
        assert_eq!(recorded.url, "http://localhost:8000/api/key/set");
        assert_eq!(
            recorded.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(recorded.json_body().unwrap()["session_id"], "s-1");
    }
}
