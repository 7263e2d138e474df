//! Request and response bodies for the generation backend.
//!
//! Field names follow the backend's camelCase JSON. Requests borrow from the
//! gateway request types so nothing is cloned on the way out.

use creativerse_core::{Character, IllustrationRef, NarrativeControls};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-story-and-images`.
///
/// The backend picks the provider from `controls.aiProvider`; `provider`
/// repeats it at the top level.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoundBody<'a> {
    pub controls: &'a NarrativeControls,
    pub current_round: u32,
    pub previous_part_text: Option<&'a str>,
    pub characters: &'a [Character],
    pub provider: &'a str,
}

/// Body of `POST /api/regenerate-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IllustrationBody<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub characters: &'a [Character],
    pub style: &'a str,
    pub provider: &'a str,
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackBody<'a> {
    pub original_text: &'a str,
    pub edited_text: &'a str,
    pub provider: &'a str,
}

/// Body of `POST /api/character-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PortraitBody<'a> {
    pub description: &'a str,
    pub style: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<&'a IllustrationRef>,
    pub provider: &'a str,
}

/// The character as the symbolic concept route expects it.
#[derive(Debug, Serialize)]
pub(crate) struct SymbolCharacter<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Body of `POST /api/symbolic-concept`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConceptBody<'a> {
    pub character: SymbolCharacter<'a>,
    pub theme: &'a str,
    pub provider: &'a str,
}

/// Body of `POST /api/symbolic-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SymbolImageBody<'a> {
    pub concept: &'a str,
    pub theme: &'a str,
    pub style: &'a str,
    pub provider: &'a str,
}

/// Error payload returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
