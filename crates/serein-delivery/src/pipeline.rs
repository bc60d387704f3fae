//! The delivery pipeline: bounded, backoff-spaced attempts around a
//! [`Transport`].
//!
//! One call to [`DeliveryPipeline::send`] is one logical send:
//! `Idle -> Sending -> {Success | WaitingToRetry -> Sending -> ... | Failed}`.
//! Every attempt resubmits the identical, unreordered turn history.
//! Calls are independent; nothing is shared between concurrent sends
//! beyond the transport itself.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use serein_types::config::DEFAULT_ATTEMPT_TIMEOUT_SECS;
use serein_types::{ConversationTurn, EventSink, NoopSink, PipelineEvent};

use crate::error::{DeliveryError, Result};
use crate::fallback::FallbackReplies;
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Reply bodies the backend is known to emit while degraded; treated
/// the same as an empty reply.
const PLACEHOLDER_REPLY: &str = "...";

/// Orchestrates request/response exchanges with the backend.
///
/// Constructed once by the application root and passed by reference to
/// consumers; there is no global instance. The transport, retry policy
/// and event sink are all injected, so the pipeline is testable in
/// isolation.
pub struct DeliveryPipeline<T> {
    transport: T,
    policy: RetryPolicy,
    sink: Arc<dyn EventSink>,
    attempt_timeout: Duration,
    fallbacks: FallbackReplies,
}

impl<T: Transport> DeliveryPipeline<T> {
    /// Create a pipeline over `transport` with the given retry policy.
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            sink: Arc::new(NoopSink),
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            fallbacks: FallbackReplies::new(),
        }
    }

    /// Replace the event sink.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the per-attempt timeout. An attempt that outlives it is
    /// treated as a retryable transport failure.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send the full turn history and resolve to the raw assistant
    /// reply text, unparsed.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`]: transient failures are retried up
    /// to the policy's attempt budget and surfaced only after
    /// exhaustion; auth and other client errors are surfaced
    /// immediately.
    pub async fn send(&self, turns: &[ConversationTurn]) -> Result<String> {
        self.send_with_cancellation(turns, &CancellationToken::new())
            .await
    }

    /// [`send`](Self::send), but abandoned as soon as `cancel` fires:
    /// during an attempt or a backoff wait, cancellation wins and any
    /// in-flight response is dropped.
    pub async fn send_with_cancellation(
        &self,
        turns: &[ConversationTurn],
        cancel: &CancellationToken,
    ) -> Result<String> {
        let mut attempt: u32 = 1;

        loop {
            if cancel.is_cancelled() {
                self.sink.emit(&PipelineEvent::Cancelled { attempt });
                return Err(DeliveryError::Cancelled);
            }

            self.sink.emit(&PipelineEvent::AttemptStarted { attempt });
            debug!(attempt, turns = turns.len(), "issuing backend attempt");

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    self.sink.emit(&PipelineEvent::Cancelled { attempt });
                    return Err(DeliveryError::Cancelled);
                }
                result = tokio::time::timeout(
                    self.attempt_timeout,
                    self.transport.exchange(turns),
                ) => result.unwrap_or_else(|_| {
                    Err(DeliveryError::Transport("attempt timed out".into()))
                }),
            };

            let err = match outcome {
                Ok(reply) if is_empty_reply(&reply) => DeliveryError::EmptyReply,
                Ok(reply) => {
                    if attempt > 1 {
                        debug!(attempt, "send succeeded after retry");
                    }
                    self.sink.emit(&PipelineEvent::Resolved { attempts: attempt });
                    return Ok(reply);
                }
                Err(err) => err,
            };

            let retryable = self.policy.is_retryable(&err);
            self.sink.emit(&PipelineEvent::AttemptFailed { attempt, retryable });

            if !retryable || attempt >= self.policy.max_attempts {
                warn!(attempt, error = %err, retryable, "send failed terminally");
                self.sink.emit(&PipelineEvent::Rejected { attempts: attempt });
                return Err(err);
            }

            let delay = self.policy.delay_after(attempt);
            self.sink.emit(&PipelineEvent::RetryScheduled { attempt, delay });
            warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying after transient failure"
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    self.sink.emit(&PipelineEvent::Cancelled { attempt });
                    return Err(DeliveryError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// A reassuring reply for the UI to show after a terminal failure.
    /// Rotates so repeated failures do not repeat the same line.
    pub fn fallback_reply(&self) -> &'static str {
        self.fallbacks.next()
    }
}

/// A reply that carries no usable content: blank, or the backend's
/// degraded-mode placeholder.
fn is_empty_reply(reply: &str) -> bool {
    let trimmed = reply.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER_REPLY
}

impl<T: std::fmt::Debug> std::fmt::Debug for DeliveryPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryPipeline")
            .field("transport", &self.transport)
            .field("policy", &self.policy)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}
