//! HTTP transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use webterm_types::{SessionConfig, TransportError};

use crate::transport::Transport;

/// Transport that resolves request paths against a fixed origin.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from the session configuration.
    pub fn new(config: &SessionConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Other {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Absolute URL for a request path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Value, TransportError> {
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        log::debug!("{url} -> {status}");
        if !status.is_success() {
            return Err(TransportError::from_status(
                status.as_u16(),
                format!("Http failure response for {url}: {status}"),
            ));
        }
        response.json::<Value>().await.map_err(classify)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        self.send(&url, self.client.get(&url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        self.send(&url, self.client.post(&url).json(body)).await
    }
}

/// Map a `reqwest` failure onto the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    if let Some(status) = err.status() {
        return TransportError::from_status(status.as_u16(), err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return TransportError::Other {
            status: None,
            message: err.to_string(),
        };
    }
    TransportError::Unreachable(err.to_string())
}
