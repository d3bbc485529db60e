//! The transport trait and typed request helper.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use webterm_types::TransportError;

/// Abstraction over the backend connection.
///
/// Paths are absolute request paths (e.g. `/api/health`); resolving them
/// against an origin is the implementation's concern. No timeout is applied
/// by callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and return the decoded JSON body.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    /// Issue a POST with a JSON body and return the decoded JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

/// GET `path` and decode the body into `T`.
///
/// A body that does not match `T` is reported as [`TransportError::Other`].
pub async fn get_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
) -> Result<T, TransportError> {
    let value = transport.get(path).await?;
    serde_json::from_value(value).map_err(|e| TransportError::Other {
        status: None,
        message: format!("invalid response from {path}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::payload::HealthStatus;
    use serde_json::json;

    #[tokio::test]
    async fn get_json_decodes_payload() {
        let t = MockTransport::new().with_response(
            "/api/health",
            json!({"status": "ok", "message": "up", "timestamp": "t0"}),
        );
        let health: HealthStatus = get_json(&t, "/api/health").await.unwrap();
        assert_eq!(health.message, "up");
        assert_eq!(health.timestamp, "t0");
    }

    #[tokio::test]
    async fn get_json_reports_shape_mismatch() {
        let t = MockTransport::new().with_response("/api/health", json!([1, 2, 3]));
        let err = get_json::<HealthStatus>(&t, "/api/health").await.unwrap_err();
        assert!(matches!(err, TransportError::Other { status: None, .. }));
    }

    #[tokio::test]
    async fn get_json_passes_transport_errors_through() {
        let t = MockTransport::new().with_error("/api/health", TransportError::Server(500));
        let err = get_json::<HealthStatus>(&t, "/api/health").await.unwrap_err();
        assert_eq!(err, TransportError::Server(500));
    }
}
