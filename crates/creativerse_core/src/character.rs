//! Story characters and how they are depicted.

use crate::IllustrationRef;
use serde::{Deserialize, Serialize};

/// How a character is depicted in generated art.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RepresentationStyle {
    /// A storybook portrait of the character
    #[default]
    #[display("portrait")]
    Portrait,
    /// An abstract symbol standing in for the character
    #[display("symbolic")]
    Symbolic,
}

impl std::str::FromStr for RepresentationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(RepresentationStyle::Portrait),
            "symbolic" => Ok(RepresentationStyle::Symbolic),
            _ => Err(format!("Unknown representation style: {}", s)),
        }
    }
}

/// A character in the story's cast.
///
/// # Examples
///
/// ```
/// use creativerse_core::{Character, RepresentationStyle};
///
/// let frida = Character::symbolic("Frida", "A curious toddler", "Magic & Wonder");
/// assert_eq!(frida.representation, RepresentationStyle::Symbolic);
/// assert!(!frida.is_realized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Visual and personality description
    pub description: String,
    /// User-supplied reference image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<IllustrationRef>,
    /// Portrait or symbolic depiction
    #[serde(rename = "representationStyle")]
    pub representation: RepresentationStyle,
    /// Theme used to pick a symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic_theme: Option<String>,
    /// Generated symbol, e.g. "a wise owl with glowing eyes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic_concept: Option<String>,
    /// Realized portrait or symbol art
    #[serde(default, rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub illustration: Option<IllustrationRef>,
}

impl Character {
    fn with_style(
        name: impl Into<String>,
        description: impl Into<String>,
        representation: RepresentationStyle,
    ) -> Self {
        Self {
            id: format!("char-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            description: description.into(),
            reference_image: None,
            representation,
            symbolic_theme: None,
            symbolic_concept: None,
            illustration: None,
        }
    }

    /// A character depicted by portrait.
    pub fn portrait(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_style(name, description, RepresentationStyle::Portrait)
    }

    /// A character depicted by a symbol drawn from `theme`.
    pub fn symbolic(
        name: impl Into<String>,
        description: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        let mut character = Self::with_style(name, description, RepresentationStyle::Symbolic);
        character.symbolic_theme = Some(theme.into());
        character
    }

    /// Attach a reference image.
    pub fn with_reference_image(mut self, image: impl Into<IllustrationRef>) -> Self {
        self.reference_image = Some(image.into());
        self
    }

    /// Attach already-realized art.
    pub fn with_illustration(mut self, image: impl Into<IllustrationRef>) -> Self {
        self.illustration = Some(image.into());
        self
    }

    /// True once the character has art.
    pub fn is_realized(&self) -> bool {
        self.illustration.is_some()
    }

    /// Record a symbolic realization.
    pub fn apply_symbol(&mut self, realization: SymbolicRealization) {
        self.symbolic_concept = Some(realization.concept);
        self.illustration = Some(realization.illustration);
    }
}

/// A symbolic concept and the art generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolicRealization {
    /// Symbol standing in for the character
    pub concept: String,
    /// Art depicting the symbol
    pub illustration: IllustrationRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parsing() {
        assert_eq!(
            "Symbolic".parse::<RepresentationStyle>().unwrap(),
            RepresentationStyle::Symbolic
        );
        assert!("cubist".parse::<RepresentationStyle>().is_err());
    }

    #[test]
    fn test_apply_symbol_realizes() {
        let mut leo = Character::portrait("Leo", "A young inventor");
        leo.apply_symbol(SymbolicRealization {
            concept: "A brass gear".to_string(),
            illustration: "img://gear".into(),
        });
        assert!(leo.is_realized());
        assert_eq!(leo.symbolic_concept.as_deref(), Some("A brass gear"));
    }

    #[test]
    fn test_wire_names() {
        let leo = Character::portrait("Leo", "inventor").with_illustration("img://leo");
        let json = serde_json::to_value(&leo).unwrap();
        assert_eq!(json["representationStyle"], "portrait");
        assert_eq!(json["imageData"], "img://leo");
        assert!(json.get("symbolicTheme").is_none());
    }
}
