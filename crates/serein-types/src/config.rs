//! Backend endpoint configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-attempt timeout, in seconds.
///
/// A hung request is converted into the same retryable failure as a
/// network error once this elapses.
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// How to reach the conversation backend.
///
/// The assistant talks to a single endpoint: `{base_url}{chat_path}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g. "https://api.serein.app").
    pub base_url: String,

    /// Path of the chat endpoint (e.g. "/api/chat").
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Extra HTTP headers to include in every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Per-attempt timeout in seconds. Defaults to 30.
    #[serde(default)]
    pub attempt_timeout_secs: Option<u64>,
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

impl BackendConfig {
    /// Create a config for the given base URL with default chat path,
    /// no extra headers and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            chat_path: default_chat_path(),
            headers: HashMap::new(),
            attempt_timeout_secs: None,
        }
    }

    /// Full URL of the chat endpoint, tolerating a trailing slash on
    /// the base URL.
    pub fn chat_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{}", self.chat_path)
    }

    /// Effective per-attempt timeout.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(
            self.attempt_timeout_secs
                .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT_SECS),
        )
    }
}
