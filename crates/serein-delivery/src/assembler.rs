//! Conversation assembly: from UI message history to the ordered turn
//! list the pipeline sends.
//!
//! The wire contract only knows user and assistant origins, so the
//! persona/system instruction is mapped onto an opening user turn,
//! followed by every surviving message in chronological order.
//! Assistant turns resubmit their raw text (directive included) so the
//! model sees its own history exactly as it produced it.

use serein_types::{ChatMessage, ConversationTurn, Origin};

/// The fixed persona / system instruction sent ahead of every
/// conversation.
pub const PERSONA_PREAMBLE: &str = "Tu es Serein, un compagnon de bien-être bienveillant. \
     Tu réponds en français, avec douceur et sans jargon médical. \
     Quand une action peut aider, tu peux inclure au plus une directive \
     de la forme #NOM{...} dans ta réponse.";

/// Builds the ordered turn list consumed by the delivery pipeline.
#[derive(Debug, Clone)]
pub struct ConversationAssembler {
    preamble: String,
}

impl ConversationAssembler {
    /// Assembler with the standard persona preamble.
    pub fn new() -> Self {
        Self {
            preamble: PERSONA_PREAMBLE.to_string(),
        }
    }

    /// Assembler with a custom preamble (tests, experiments).
    pub fn with_preamble(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    /// Project the message history onto the wire turn list: preamble
    /// first, then each message in order. No turn is dropped,
    /// duplicated, or reordered.
    pub fn assemble(&self, history: &[ChatMessage]) -> Vec<ConversationTurn> {
        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.push(ConversationTurn {
            origin: Origin::User,
            text: self.preamble.clone(),
        });
        turns.extend(history.iter().map(ChatMessage::to_turn));
        turns
    }
}

impl Default for ConversationAssembler {
    fn default() -> Self {
        Self::new()
    }
}
