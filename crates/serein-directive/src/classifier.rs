//! Presentation classification for recognized directives.
//!
//! Given a directive name and its parameters, [`classify`] decides how
//! the UI should present the action: inline (`simple`), as a local
//! preview card (`preview`), or as a full-screen experience
//! (`immersive`). The mapping is a pure policy table; no parameter
//! combination can make it fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use serein_types::ParamValue;

use crate::kind::DirectiveKind;

/// The presentation class chosen for a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    /// Inline chip or banner in the conversation flow.
    Simple,
    /// A card with enough detail to preview the action locally.
    Preview,
    /// A full-screen, navigated experience.
    Immersive,
}

/// Optional detail used to render a local preview.
///
/// Populated only from parameters the directive actually carried; a
/// field is `None` when the backend left it out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    /// Breathing technique identifier (e.g. "4-7-8").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,

    /// Number of breathing cycles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,

    /// Session duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,

    /// Sound theme identifier (e.g. "pluie", "ocean").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Journaling prompt text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl PreviewData {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Short human-facing metadata for an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    /// One-line title.
    pub title: String,

    /// One-sentence description.
    pub description: String,

    /// Preview detail, present only for `preview` actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewData>,

    /// Whether the UI must ask before acting (crisis redirects).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_confirmation: bool,
}

/// A directive resolved into something the UI can present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualAction {
    /// The recognized directive kind.
    pub kind: DirectiveKind,

    /// Presentation class.
    pub context_type: ContextType,

    /// The directive parameters, passed through for the action handler.
    pub params: BTreeMap<String, ParamValue>,

    /// Human-facing metadata.
    pub metadata: ActionMetadata,
}

/// Path prefix that marks a redirect as a crisis resource.
const CRISIS_PATH_PREFIX: &str = "/urgence";

/// Classify a directive into a [`ContextualAction`].
///
/// Returns `None` only when there is no directive (`directive_name` is
/// `None`). Unknown directive names still classify, to a generic
/// `simple` action.
pub fn classify(
    directive_name: Option<&str>,
    params: &BTreeMap<String, ParamValue>,
) -> Option<ContextualAction> {
    let name = directive_name?;
    let kind = DirectiveKind::from_name(name);

    let (context_type, mut metadata) = match &kind {
        DirectiveKind::Breathing => {
            let preview = PreviewData {
                technique: str_param(params, "type"),
                cycles: num_param(params, "cycles"),
                duration_secs: num_param(params, "duree"),
                ..PreviewData::default()
            };
            with_preview(
                preview,
                "Exercice de respiration",
                "Un exercice guidé pour ralentir le souffle.",
            )
        }
        DirectiveKind::BreathingFull => (
            ContextType::Immersive,
            metadata_for(
                "Respiration guidée",
                "Une session de respiration en plein écran.",
            ),
        ),
        DirectiveKind::Journal => {
            let preview = PreviewData {
                prompt: str_param(params, "prompt"),
                ..PreviewData::default()
            };
            with_preview(
                preview,
                "Moment d'écriture",
                "Une invitation à poser quelques mots.",
            )
        }
        DirectiveKind::Sound => {
            let preview = PreviewData {
                theme: str_param(params, "theme"),
                duration_secs: num_param(params, "duree"),
                ..PreviewData::default()
            };
            with_preview(preview, "Ambiance sonore", "Des sons apaisants à écouter.")
        }
        DirectiveKind::SoundNavigate => (
            ContextType::Immersive,
            metadata_for("Espace sonore", "Ouvre l'espace d'écoute immersif."),
        ),
        DirectiveKind::Redirect => (
            ContextType::Simple,
            metadata_for("Ressource", "Un lien vers une ressource d'aide."),
        ),
        DirectiveKind::Info => (
            ContextType::Simple,
            metadata_for("Information", "Une information de l'assistant."),
        ),
        DirectiveKind::Unknown(_) => (
            ContextType::Simple,
            metadata_for("Action", "Une action proposée par l'assistant."),
        ),
    };

    if kind == DirectiveKind::Redirect && is_crisis_redirect(params) {
        metadata.requires_confirmation = true;
    }

    Some(ContextualAction {
        kind,
        context_type,
        params: params.clone(),
        metadata,
    })
}

/// A directive with optional preview detail: `preview` context when any
/// of its preview parameters are present, `simple` otherwise.
fn with_preview(
    preview: PreviewData,
    title: &str,
    description: &str,
) -> (ContextType, ActionMetadata) {
    let mut metadata = metadata_for(title, description);
    if preview.is_empty() {
        (ContextType::Simple, metadata)
    } else {
        metadata.preview = Some(preview);
        (ContextType::Preview, metadata)
    }
}

fn metadata_for(title: &str, description: &str) -> ActionMetadata {
    ActionMetadata {
        title: title.to_string(),
        description: description.to_string(),
        preview: None,
        requires_confirmation: false,
    }
}

fn is_crisis_redirect(params: &BTreeMap<String, ParamValue>) -> bool {
    params
        .get("path")
        .and_then(ParamValue::as_str)
        .is_some_and(|path| path.starts_with(CRISIS_PATH_PREFIX))
}

fn str_param(params: &BTreeMap<String, ParamValue>, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Numeric parameter as a count. Truncation is fine here: the grammar
/// only produces non-negative numbers.
fn num_param(params: &BTreeMap<String, ParamValue>, key: &str) -> Option<u32> {
    params.get(key).and_then(ParamValue::as_num).map(|n| n as u32)
}
