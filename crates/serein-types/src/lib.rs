//! Shared types for the serein conversational assistant.
//!
//! This crate holds the data model used across the directive protocol
//! and the delivery pipeline: conversation turns and chat messages,
//! flat directive parameter values, backend configuration, and the
//! pipeline observability events. It has no I/O and no dependency on
//! other serein crates.

pub mod config;
pub mod event;
pub mod message;
pub mod value;

pub use config::BackendConfig;
pub use event::{EventSink, NoopSink, PipelineEvent};
pub use message::{ChatMessage, ConversationTurn, Origin};
pub use value::ParamValue;
