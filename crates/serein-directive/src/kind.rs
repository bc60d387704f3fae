//! The closed set of directive kinds the client knows how to act on.

use serde::{Deserialize, Serialize};

/// A known directive kind.
///
/// Directive names arrive as strings from the backend; mapping them
/// through this enum keeps the dispatch exhaustive -- adding a new
/// directive is a compile-time-checked change, and anything the client
/// does not recognize lands in [`DirectiveKind::Unknown`] instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// `EXERCICE_RESPIRATION` -- inline breathing exercise.
    Breathing,
    /// `EXERCICE_RESPIRATION_COMPLET` -- full-screen breathing session.
    BreathingFull,
    /// `JOURNAL` -- journaling prompt.
    Journal,
    /// `SESSION_SON` -- ambient sound session.
    Sound,
    /// `NAVIGUER_SON` -- navigate to the immersive sound space.
    SoundNavigate,
    /// `REDIRECT` -- send the user to an in-app or external resource.
    Redirect,
    /// `INFO` -- informational notice, no action beyond display.
    Info,
    /// Any directive name the client does not recognize.
    Unknown(String),
}

impl DirectiveKind {
    /// Map a directive name to its kind. Unrecognized names are kept
    /// verbatim in [`DirectiveKind::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "EXERCICE_RESPIRATION" => Self::Breathing,
            "EXERCICE_RESPIRATION_COMPLET" => Self::BreathingFull,
            "JOURNAL" => Self::Journal,
            "SESSION_SON" => Self::Sound,
            "NAVIGUER_SON" => Self::SoundNavigate,
            "REDIRECT" => Self::Redirect,
            "INFO" => Self::Info,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire name of this kind.
    pub fn as_name(&self) -> &str {
        match self {
            Self::Breathing => "EXERCICE_RESPIRATION",
            Self::BreathingFull => "EXERCICE_RESPIRATION_COMPLET",
            Self::Journal => "JOURNAL",
            Self::Sound => "SESSION_SON",
            Self::SoundNavigate => "NAVIGUER_SON",
            Self::Redirect => "REDIRECT",
            Self::Info => "INFO",
            Self::Unknown(name) => name,
        }
    }
}
