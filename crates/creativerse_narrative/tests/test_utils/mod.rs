//! Test utilities for Creativerse narrative tests.

#![allow(dead_code)]

use creativerse_core::{Character, NarrativeControls, StoryConfig};

pub mod mock_gateway;

pub use mock_gateway::{option_set, MockGateway};

/// Story config with `options` options per round.
pub fn story_config(options: usize) -> StoryConfig {
    StoryConfig::default().with_options_per_round(options)
}

/// Controls for a story of `rounds` rounds with the given cast.
pub fn controls(rounds: u32, characters: Vec<Character>) -> NarrativeControls {
    NarrativeControls::builder()
        .prompt("The Clockwork Dragon")
        .num_rounds(rounds)
        .characters(characters)
        .build()
        .expect("Failed to build controls")
}
