//! Delivery pipeline between the serein UI and its conversation
//! backend.
//!
//! This crate moves conversation turns to the language-model backend
//! and brings raw replies back, surviving transient network and server
//! failures along the way:
//!
//! - [`Transport`] is the protocol seam; [`HttpTransport`] implements
//!   it over the single backend chat endpoint.
//! - [`DeliveryPipeline`] wraps a transport with bounded attempts,
//!   exponential backoff, per-attempt timeouts, and cancellation.
//! - [`DeliveryError`] is the failure taxonomy; [`RetryPolicy`]
//!   decides which classes are worth re-attempting.
//! - [`ConversationAssembler`] builds the ordered turn list from the
//!   UI's message history.
//!
//! The reply text resolves unparsed: extracting a directive from it is
//! the caller's job, via `serein-directive`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use serein_delivery::{ConversationAssembler, DeliveryPipeline, HttpTransport, RetryPolicy};
//! use serein_types::BackendConfig;
//!
//! let transport = HttpTransport::new(BackendConfig::new("https://api.serein.app"));
//! let pipeline = DeliveryPipeline::new(transport, RetryPolicy::default());
//!
//! let turns = ConversationAssembler::new().assemble(&history);
//! match pipeline.send(&turns).await {
//!     Ok(reply) => render(serein_directive::parse(&reply)),
//!     Err(_) => render_plain(pipeline.fallback_reply()),
//! }
//! ```

pub mod assembler;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod retry;
pub mod transport;

pub use assembler::{ConversationAssembler, PERSONA_PREAMBLE};
pub use error::{DeliveryError, Result};
pub use fallback::FallbackReplies;
pub use pipeline::DeliveryPipeline;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, Transport};
