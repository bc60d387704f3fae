//! Transport seam between the pipeline and the backend.
//!
//! [`Transport`] is the single async boundary the pipeline depends on;
//! tests swap in mocks. [`HttpTransport`] is the real implementation:
//! one POST of the full turn history to the backend's chat endpoint,
//! with HTTP status classes mapped onto the [`DeliveryError`] taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use serein_types::{BackendConfig, ConversationTurn};

use crate::error::{DeliveryError, Result};

/// Something that can exchange a turn history for a raw reply.
///
/// Implementations are responsible for protocol details only; retry,
/// backoff, and empty-reply handling belong to the pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the full, ordered turn history and return the raw
    /// assistant reply text.
    async fn exchange(&self, turns: &[ConversationTurn]) -> Result<String>;
}

/// Outbound request body: the ordered turn history, nothing else.
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    turns: &'a [ConversationTurn],
}

/// Success response body.
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    reply: String,
}

/// Optional failure response body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP transport against the serein backend.
pub struct HttpTransport {
    config: BackendConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the given backend.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, turns: &[ConversationTurn]) -> Result<String> {
        let url = self.config.chat_url();

        debug!(url = %url, turns = turns.len(), "sending conversation to backend");

        // The config timeout is a per-request ceiling; the pipeline
        // applies its own per-attempt deadline on top of it.
        let mut req = self
            .http
            .post(&url)
            .timeout(self.config.attempt_timeout())
            .json(&ChatRequestBody { turns });
        for (k, v) in &self.config.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let response = req
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let code = status.as_u16();
            let body = response.text().await.unwrap_or_default();
            let detail = extract_error_detail(&body);
            warn!(status = code, detail = ?detail, "backend returned error status");
            return Err(classify_status(code, detail));
        }

        let body: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| DeliveryError::Transport(format!("unreadable reply body: {e}")))?;

        debug!(reply_len = body.reply.len(), "backend reply received");
        Ok(body.reply)
    }
}

/// Map an HTTP error status onto the taxonomy.
///
/// 401/403 are auth rejections; 429 and the 5xx class are
/// overload/timeout failures (the retry policy decides which of those
/// are actually worth re-attempting); every other 4xx is a terminal
/// client error.
fn classify_status(status: u16, detail: Option<String>) -> DeliveryError {
    match status {
        401 | 403 => DeliveryError::Auth { status, detail },
        429 => DeliveryError::ServerOverload { status, detail },
        400..=499 => DeliveryError::ClientRequest { status, detail },
        _ => DeliveryError::ServerOverload { status, detail },
    }
}

/// Pull the optional `{"error": "..."}` message out of a failure body.
fn extract_error_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => Some(body.to_string()),
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url)
            .field("chat_path", &self.config.chat_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            classify_status(401, None),
            DeliveryError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            classify_status(403, None),
            DeliveryError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            classify_status(429, None),
            DeliveryError::ServerOverload { status: 429, .. }
        ));
        assert!(matches!(
            classify_status(404, None),
            DeliveryError::ClientRequest { status: 404, .. }
        ));
        assert!(matches!(
            classify_status(422, None),
            DeliveryError::ClientRequest { status: 422, .. }
        ));
        assert!(matches!(
            classify_status(500, None),
            DeliveryError::ServerOverload { status: 500, .. }
        ));
        assert!(matches!(
            classify_status(503, None),
            DeliveryError::ServerOverload { status: 503, .. }
        ));
    }

    #[test]
    fn error_detail_from_json_body() {
        assert_eq!(
            extract_error_detail(r#"{"error": "surchargé"}"#),
            Some("surchargé".to_string())
        );
    }

    #[test]
    fn error_detail_absent_field() {
        assert_eq!(extract_error_detail(r#"{"status": "down"}"#), None);
    }

    #[test]
    fn error_detail_non_json_body_kept_verbatim() {
        assert_eq!(
            extract_error_detail("Bad Gateway"),
            Some("Bad Gateway".to_string())
        );
    }

    #[test]
    fn error_detail_empty_body() {
        assert_eq!(extract_error_detail(""), None);
        assert_eq!(extract_error_detail("   "), None);
    }

    #[test]
    fn request_body_shape() {
        let turns = vec![
            ConversationTurn::user("Bonjour"),
            ConversationTurn::assistant("Bonsoir"),
        ];
        let json = serde_json::to_string(&ChatRequestBody { turns: &turns }).unwrap();
        assert_eq!(
            json,
            r#"{"turns":[{"origin":"user","text":"Bonjour"},{"origin":"assistant","text":"Bonsoir"}]}"#
        );
    }

    #[test]
    fn debug_shows_endpoint_only() {
        let transport = HttpTransport::new(BackendConfig::new("https://api.example.com"));
        let debug = format!("{transport:?}");
        assert!(debug.contains("api.example.com"));
        assert!(debug.contains("/api/chat"));
    }
}
