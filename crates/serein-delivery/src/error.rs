//! Error taxonomy for the delivery pipeline.
//!
//! Variants split into two groups: transient failures the pipeline
//! retries locally (transport loss, overloaded server, empty reply)
//! and terminal failures surfaced immediately (auth rejection, other
//! client errors, cancellation).

use thiserror::Error;

/// Errors that can end a logical send.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeliveryError {
    // ── Transient ────────────────────────────────────────────────────

    /// No response reached us: connection failure, DNS, or an attempt
    /// that hit its timeout.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with an overload/timeout class status.
    #[error("server overloaded: HTTP {status}")]
    ServerOverload {
        /// The HTTP status code received.
        status: u16,
        /// Error detail from the response body, if any.
        detail: Option<String>,
    },

    /// A well-formed response whose reply body was empty or a
    /// placeholder. Transient backend degradation; retried like a
    /// transport failure.
    #[error("backend returned an empty reply")]
    EmptyReply,

    // ── Terminal ─────────────────────────────────────────────────────

    /// Authentication or authorization was rejected (401/403 class).
    #[error("authentication rejected: HTTP {status}")]
    Auth {
        /// The HTTP status code received.
        status: u16,
        /// Error detail from the response body, if any.
        detail: Option<String>,
    },

    /// Any other non-retryable client error status.
    #[error("request rejected: HTTP {status}")]
    ClientRequest {
        /// The HTTP status code received.
        status: u16,
        /// Error detail from the response body, if any.
        detail: Option<String>,
    },

    /// The caller cancelled the send.
    #[error("send cancelled")]
    Cancelled,
}

impl DeliveryError {
    /// The HTTP status carried by this error, when one applies.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerOverload { status, .. }
            | Self::Auth { status, .. }
            | Self::ClientRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;
