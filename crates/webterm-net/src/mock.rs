//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use webterm_types::TransportError;

use crate::transport::Transport;

/// Transport that answers from a fixed route table.
///
/// Paths without a route fail as unreachable, which is what a session sees
/// when no backend is running.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Result<Value, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`.
    pub fn with_response(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), Ok(body));
        self
    }

    /// Fail `path` with `error`.
    pub fn with_error(mut self, path: &str, error: TransportError) -> Self {
        self.routes.insert(path.to_string(), Err(error));
        self
    }

    /// Paths requested so far, prefixed with the method.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn answer(&self, method: &str, path: &str) -> Result<Value, TransportError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(format!("{method} {path}"));
        }
        self.routes
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Unreachable(format!("no route for {path}"))))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.answer("GET", path)
    }

    async fn post(&self, path: &str, _body: &Value) -> Result<Value, TransportError> {
        self.answer("POST", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_route_is_unreachable() {
        let t = MockTransport::new();
        let err = t.get("/nowhere").await.unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(_)));
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let t = MockTransport::new().with_response("/a", json!(1));
        t.get("/a").await.unwrap();
        let _ = t.post("/b", &json!({})).await;
        assert_eq!(t.requests(), vec!["GET /a", "POST /b"]);
    }
}
