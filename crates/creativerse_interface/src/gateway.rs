//! The content generator seam and its request types.

use async_trait::async_trait;
use creativerse_core::{
    Character, IllustrationRef, NarrativeControls, RoundOptionSet, SymbolicRealization,
};
use creativerse_error::{BuilderError, CreativerseResult};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Parameters for generating one round of chapter options.
///
/// # Examples
///
/// ```
/// use creativerse_core::NarrativeControls;
/// use creativerse_interface::RoundRequestBuilder;
///
/// let controls = NarrativeControls::builder().prompt("A lost kite").build().unwrap();
/// let request = RoundRequestBuilder::default()
///     .controls(controls)
///     .round(2u32)
///     .previous_chapter("Up It Goes The kite rose.")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.round(), 2);
/// assert!(request.characters().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into, strip_option))]
pub struct RoundRequest {
    /// Narrative settings
    controls: NarrativeControls,

    /// Round number, starting at 1
    round: u32,

    /// Text of the chosen chapter this round continues from
    #[builder(default)]
    previous_chapter: Option<String>,

    /// Realized cast
    #[builder(default)]
    characters: Vec<Character>,
}

/// Parameters for redrawing a chapter's illustration after an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct IllustrationRequest {
    /// Chapter title
    title: String,

    /// Chapter body
    body: String,

    /// Realized cast
    #[builder(default)]
    characters: Vec<Character>,

    /// Illustration style
    style: String,
}

/// Parameters for painting a character portrait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into, strip_option))]
pub struct PortraitRequest {
    /// Visual description of the character
    description: String,

    /// User-supplied reference image
    #[builder(default)]
    reference_image: Option<IllustrationRef>,

    /// Illustration style
    style: String,
}

/// Parameters for choosing and drawing a character's symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct SymbolRequest {
    /// Character name
    name: String,

    /// Character description
    description: String,

    /// Theme the symbol is drawn from
    theme: String,

    /// Illustration style
    style: String,
}

impl From<RoundRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: RoundRequestBuilderError) -> Self {
        match err {
            RoundRequestBuilderError::UninitializedField(field) => BuilderError::missing(field),
            RoundRequestBuilderError::ValidationError(reason) => BuilderError::invalid(reason),
        }
    }
}

impl From<IllustrationRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: IllustrationRequestBuilderError) -> Self {
        match err {
            IllustrationRequestBuilderError::UninitializedField(field) => BuilderError::missing(field),
            IllustrationRequestBuilderError::ValidationError(reason) => BuilderError::invalid(reason),
        }
    }
}

impl From<PortraitRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: PortraitRequestBuilderError) -> Self {
        match err {
            PortraitRequestBuilderError::UninitializedField(field) => BuilderError::missing(field),
            PortraitRequestBuilderError::ValidationError(reason) => BuilderError::invalid(reason),
        }
    }
}

impl From<SymbolRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: SymbolRequestBuilderError) -> Self {
        match err {
            SymbolRequestBuilderError::UninitializedField(field) => BuilderError::missing(field),
            SymbolRequestBuilderError::ValidationError(reason) => BuilderError::invalid(reason),
        }
    }
}

/// Core trait every content generator implements.
///
/// Implementations return one [`RoundOptionSet`] per round with options in a
/// stable order. The branch controller checks the option count; gateways
/// need not.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generate the candidate chapters for one round.
    async fn generate_round(&self, req: &RoundRequest) -> CreativerseResult<RoundOptionSet>;

    /// Redraw the illustration for edited chapter text.
    async fn regenerate_illustration(
        &self,
        req: &IllustrationRequest,
    ) -> CreativerseResult<IllustrationRef>;

    /// Comment on how an edit changed a chapter.
    async fn critique(&self, original: &str, edited: &str) -> CreativerseResult<String>;

    /// Paint a character portrait.
    async fn realize_portrait(&self, req: &PortraitRequest) -> CreativerseResult<IllustrationRef>;

    /// Pick a symbol for a character and draw it.
    async fn realize_symbol(&self, req: &SymbolRequest) -> CreativerseResult<SymbolicRealization>;

    /// Provider name for logs (e.g., "http", "mock").
    fn provider_name(&self) -> &'static str;
}
