//! Trait definitions for the Creativerse story engine.
//!
//! This crate defines the two seams the branching-story core talks through:
//! [`GenerationGateway`] for producing chapters and art, and [`StoryGallery`]
//! for keeping finished stories.

mod gallery;
mod gateway;

pub use gallery::{GalleryFilter, StoryGallery};
pub use gateway::{
    GenerationGateway, IllustrationRequest, IllustrationRequestBuilder,
    IllustrationRequestBuilderError, PortraitRequest, PortraitRequestBuilder,
    PortraitRequestBuilderError, RoundRequest, RoundRequestBuilder, RoundRequestBuilderError,
    SymbolRequest, SymbolRequestBuilder, SymbolRequestBuilderError,
};
