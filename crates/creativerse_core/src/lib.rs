//! Core data types for the Creativerse branching-story engine.
//!
//! This crate holds the plain data every other Creativerse crate speaks:
//! chapter options and the round option sets they arrive in, the positional
//! [`StoryPath`] addressing scheme, characters, narrative controls, finished
//! gallery stories, plus configuration loading and telemetry setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod character;
mod config;
mod controls;
mod path;
mod story;
mod telemetry;

pub use chapter::{ChapterOption, IllustrationRef, RoundOptionSet};
pub use character::{Character, RepresentationStyle, SymbolicRealization};
pub use config::{
    CreativerseConfig, GalleryConfig, GalleryConfigBuilder, GatewayConfig, GatewayConfigBuilder,
    StoryConfig, StoryConfigBuilder,
};
pub use controls::{NarrativeControls, NarrativeControlsBuilder, NarrativeControlsBuilderError};
pub use path::StoryPath;
pub use story::{GalleryStory, StoryId, Visibility};
pub use telemetry::{init_logging, init_telemetry, shutdown_telemetry};
