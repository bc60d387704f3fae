//! Observability events emitted by the delivery pipeline.
//!
//! The pipeline reports its progress through an injectable [`EventSink`]
//! rather than ad hoc logging, so tests can assert on what happened
//! without capturing log output. [`NoopSink`] is the default.

use std::time::Duration;

/// One moment in the life of a logical send.
///
/// Attempts are numbered from 1. A send ends with exactly one of
/// [`Resolved`](PipelineEvent::Resolved),
/// [`Rejected`](PipelineEvent::Rejected) or
/// [`Cancelled`](PipelineEvent::Cancelled).
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// An outbound attempt is being issued.
    AttemptStarted {
        /// 1-based attempt number.
        attempt: u32,
    },

    /// An attempt failed.
    AttemptFailed {
        /// 1-based attempt number.
        attempt: u32,
        /// Whether the failure class is considered transient.
        retryable: bool,
    },

    /// A backoff wait has been scheduled before the next attempt.
    RetryScheduled {
        /// The attempt that just failed.
        attempt: u32,
        /// How long the pipeline will wait.
        delay: Duration,
    },

    /// The send resolved with a reply.
    Resolved {
        /// Total attempts issued.
        attempts: u32,
    },

    /// The send failed terminally.
    Rejected {
        /// Total attempts issued.
        attempts: u32,
    },

    /// The send was cancelled by the caller.
    Cancelled {
        /// The attempt in flight (or about to start) when cancelled.
        attempt: u32,
    },
}

/// Receiver for [`PipelineEvent`]s.
///
/// Implementations must be cheap: `emit` is called inline on the send
/// path.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn emit(&self, event: &PipelineEvent);
}

/// An [`EventSink`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink(Mutex<Vec<PipelineEvent>>);

    impl EventSink for RecordingSink {
        fn emit(&self, event: &PipelineEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn noop_sink_accepts_events() {
        let sink = NoopSink;
        sink.emit(&PipelineEvent::AttemptStarted { attempt: 1 });
    }

    #[test]
    fn recording_sink_observes_order() {
        let sink = RecordingSink(Mutex::new(Vec::new()));
        sink.emit(&PipelineEvent::AttemptStarted { attempt: 1 });
        sink.emit(&PipelineEvent::Resolved { attempts: 1 });
        let events = sink.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                PipelineEvent::AttemptStarted { attempt: 1 },
                PipelineEvent::Resolved { attempts: 1 },
            ]
        );
    }
}
