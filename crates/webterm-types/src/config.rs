//! Session configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Caps applied to the two session histories.
///
/// When a history grows past `*_max` it is trimmed to the most recent
/// `*_keep` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryLimits {
    pub transcript_max: usize,
    pub transcript_keep: usize,
    pub commands_max: usize,
    pub commands_keep: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            transcript_max: 1000,
            transcript_keep: 500,
            commands_max: 100,
            commands_keep: 50,
        }
    }
}

impl HistoryLimits {
    /// Reject a `keep` of zero or larger than its `max`.
    pub fn validate(&self) -> Result<()> {
        for (name, max, keep) in [
            ("transcript", self.transcript_max, self.transcript_keep),
            ("commands", self.commands_max, self.commands_keep),
        ] {
            if keep == 0 || keep > max {
                return Err(ShellError::Config(format!(
                    "history.{name}_keep must be in 1..={max}, got {keep}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for one terminal session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// User name shown in the prompt and by `whoami`.
    pub user: String,
    /// Host name shown in the prompt.
    pub hostname: String,
    /// Home sentinel; the session starts here.
    pub home: String,
    /// Path prefix for the backend API endpoints.
    pub api_base: String,
    /// Endpoint listing the backend entities.
    pub entities_path: String,
    /// Origin the HTTP transport resolves request paths against.
    pub base_url: String,
    /// Bearer token attached to HTTP requests when set.
    pub auth_token: Option<String>,
    /// HTTP client timeout in seconds.
    pub timeout_secs: u64,
    /// Initial theme.
    pub dark_theme: bool,
    pub history: HistoryLimits,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            hostname: "linux-box".to_string(),
            home: "~".to_string(),
            api_base: "/api".to_string(),
            entities_path: "/terminal/listamaschere".to_string(),
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timeout_secs: 10,
            dark_theme: false,
            history: HistoryLimits::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check a configuration built in code.
    pub fn validate(&self) -> Result<()> {
        self.history.validate()
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Full path of an endpoint under `api_base`.
    pub fn api_path(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
