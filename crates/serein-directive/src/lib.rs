//! Directive protocol for serein assistant replies.
//!
//! The language-model backend can request a client-side action (a
//! breathing exercise, a journaling prompt, a sound session, a
//! redirect) by embedding one `#NAME{key:value, ...}` directive in its
//! otherwise free-form reply. This crate is the whole protocol surface:
//!
//! - [`parse`] extracts at most one directive from raw assistant text
//!   without corrupting the human-readable portion. It never fails --
//!   malformed content degrades to plain text.
//! - [`classify`] maps a recognized directive to a [`ContextualAction`]:
//!   a presentation context plus short human metadata.
//!
//! Both functions are pure and synchronous; nothing here does I/O.

pub mod classifier;
pub mod kind;
pub mod parser;

pub use classifier::{classify, ActionMetadata, ContextType, ContextualAction, PreviewData};
pub use kind::DirectiveKind;
pub use parser::{parse, ParsedDirective};
