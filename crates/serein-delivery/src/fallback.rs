//! Reassuring fallback replies for terminal failures.
//!
//! When a send fails for good, the UI must still answer in the
//! assistant's voice -- never a stack trace or a status code. The
//! messages rotate so a flaky evening does not repeat the same line
//! at the user.

use std::sync::atomic::{AtomicUsize, Ordering};

/// The rotating set of fallback replies.
const FALLBACK_REPLIES: &[&str] = &[
    "Je rencontre un petit souci de connexion. Reprenons dans un instant, je suis toujours là.",
    "Le réseau me joue des tours. Prends une respiration, et réessaie quand tu veux.",
    "Je n'arrive pas à te répondre pour le moment, mais rien d'inquiétant. On réessaie bientôt ?",
    "Un instant de silence de mon côté. Je reste avec toi, réessaie dans un moment.",
];

/// Rotation over the fallback replies.
///
/// Each call to [`next`](FallbackReplies::next) returns the following
/// message in the cycle. Safe to share across tasks.
#[derive(Debug, Default)]
pub struct FallbackReplies {
    cursor: AtomicUsize,
}

impl FallbackReplies {
    /// Create a rotation starting at the first message.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next reassuring reply in the rotation.
    pub fn next(&self) -> &'static str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        FALLBACK_REPLIES[index % FALLBACK_REPLIES.len()]
    }
}
