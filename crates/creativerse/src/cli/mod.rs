//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the creativerse binary.

mod commands;
mod gallery;
mod input;
mod play;

pub use commands::{Cli, Commands};
pub use gallery::handle_gallery_command;
pub use play::run_play;
