//! Response bodies returned by the backend.

use serde::{Deserialize, Serialize};

/// `GET /api/ping?host=<host>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingReply {
    pub success: bool,
    pub message: String,
}

/// `GET /api/system-info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub hostname: String,
    pub kernel: String,
    pub uptime: String,
    pub memory: String,
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// `GET /terminal/listamaschere`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityList {
    #[serde(default)]
    pub code: i64,
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_list_tolerates_missing_data() {
        let list: EntityList = serde_json::from_str(r#"{"code": 500, "success": false}"#).unwrap();
        assert!(!list.success);
        assert!(list.data.is_none());
    }

    #[test]
    fn system_info_requires_every_field() {
        let err = serde_json::from_str::<SystemInfo>(r#"{"os": "Linux"}"#);
        assert!(err.is_err());
    }
}
