//! Global narrative controls supplied when a story starts.

use crate::Character;
use creativerse_error::BuilderError;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Premise, tone and shape of a story.
///
/// # Examples
///
/// ```
/// use creativerse_core::NarrativeControls;
///
/// let controls = NarrativeControls::builder()
///     .prompt("Baby Frida's new sandals")
///     .num_rounds(2u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(controls.prompt(), "Baby Frida's new sandals");
/// assert_eq!(*controls.num_rounds(), 2);
/// assert_eq!(controls.tone(), "whimsical");
/// assert_eq!(controls.ai_provider(), "gemini");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct NarrativeControls {
    /// The story premise
    prompt: String,

    /// Emotional tone
    #[builder(default = "String::from(\"whimsical\")")]
    #[serde(default)]
    tone: String,

    /// Genre
    #[builder(default = "String::from(\"adventure\")")]
    #[serde(default)]
    genre: String,

    /// Free-form constraints the generator must respect
    #[builder(default)]
    #[serde(default)]
    constraints: String,

    /// Illustration style
    #[builder(default = "String::from(\"Crayon Drawing\")")]
    #[serde(default)]
    style: String,

    /// Number of rounds before the story completes
    #[builder(default = "3")]
    num_rounds: u32,

    /// Characters requested for the story
    #[builder(default)]
    #[serde(default)]
    characters: Vec<Character>,

    /// Model provider the backend generates with
    #[builder(default = "default_ai_provider()")]
    #[serde(default = "default_ai_provider")]
    ai_provider: String,
}

fn default_ai_provider() -> String {
    "gemini".to_string()
}

impl NarrativeControls {
    /// Creates a new controls builder.
    pub fn builder() -> NarrativeControlsBuilder {
        NarrativeControlsBuilder::default()
    }

    /// Replace the requested cast.
    pub fn with_characters(mut self, characters: Vec<Character>) -> Self {
        self.characters = characters;
        self
    }
}

impl From<NarrativeControlsBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: NarrativeControlsBuilderError) -> Self {
        match err {
            NarrativeControlsBuilderError::UninitializedField(field) => BuilderError::missing(field),
            NarrativeControlsBuilderError::ValidationError(reason) => BuilderError::invalid(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creativerse_error::BuilderErrorKind;

    #[test]
    fn test_prompt_is_required() {
        let result = NarrativeControls::builder().num_rounds(2u32).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_error_converts() {
        let err = NarrativeControls::builder().build().unwrap_err();
        let converted: BuilderError = err.into();
        assert_eq!(
            converted.kind(),
            &BuilderErrorKind::MissingField("prompt".to_string())
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let controls: NarrativeControls =
            serde_json::from_str(r#"{"prompt":"A lost kite","numRounds":4}"#).unwrap();
        assert_eq!(*controls.num_rounds(), 4);
        assert!(controls.characters().is_empty());
        assert_eq!(controls.ai_provider(), "gemini");
    }

    #[test]
    fn test_provider_serializes_as_ai_provider() {
        let controls = NarrativeControls::builder()
            .prompt("A lost kite")
            .ai_provider("openai")
            .build()
            .unwrap();
        let value = serde_json::to_value(&controls).unwrap();
        assert_eq!(value["aiProvider"], serde_json::json!("openai"));
    }
}
