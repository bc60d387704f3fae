//! Conversation message types.
//!
//! [`ChatMessage`] is the UI-facing record of one turn, including the
//! directive fields derived at parse time. [`ConversationTurn`] is the
//! stripped-down wire unit sent to the backend -- origin and text only.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::ParamValue;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The human in the conversation.
    User,
    /// The language-model backend.
    Assistant,
}

/// One turn of the conversation as sent to the backend.
///
/// This is the element type of the outbound request body. It carries no
/// parser-derived fields: the backend only ever sees origin and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who authored the turn.
    pub origin: Origin,

    /// The turn text. For assistant turns this is the raw reply,
    /// directive included.
    pub text: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Assistant,
            text: text.into(),
        }
    }
}

/// A message in the conversation as held by the UI layer.
///
/// Immutable once created: the directive fields are set at most once,
/// at construction from a parse of the raw assistant reply. A message
/// may later be deleted by the user but is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,

    /// Who authored the message.
    pub origin: Origin,

    /// The text as received (assistant) or typed (user).
    pub raw_text: String,

    /// The text to render, with any directive substring removed.
    pub display_text: String,

    /// Name of the recognized directive, if the raw text carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive_name: Option<String>,

    /// Parameters of the recognized directive. Empty when none.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,

    /// When the message was created.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message. User text never carries a directive, so
    /// raw and display text are identical.
    pub fn user(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4(),
            origin: Origin::User,
            raw_text: text.clone(),
            display_text: text,
            directive_name: None,
            params: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message from the raw reply plus the fields
    /// a parse of that reply produced.
    pub fn assistant_from_parse(
        raw_text: impl Into<String>,
        display_text: impl Into<String>,
        directive_name: Option<String>,
        params: BTreeMap<String, ParamValue>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: Origin::Assistant,
            raw_text: raw_text.into(),
            display_text: display_text.into(),
            directive_name,
            params,
            timestamp: Utc::now(),
        }
    }

    /// Project this message onto its wire form.
    ///
    /// Assistant turns resubmit the raw text (directive included) so the
    /// backend sees its own history unmodified.
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            origin: self.origin,
            text: self.raw_text.clone(),
        }
    }
}
