//! Creativerse - branching, illustrated stories.
//!
//! A story starts from a premise and a cast. Each round the generator offers
//! a handful of illustrated chapter options; the reader picks one and the
//! story continues from it. Earlier choices can be revisited at any time,
//! which discards everything generated after that point and regenerates
//! from there. Finished stories go to a gallery.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use creativerse::{
//!     BranchController, CreativerseConfig, HttpGateway, JsonFileGallery, NarrativeControls,
//!     Visibility,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CreativerseConfig::load()?;
//! let gateway = HttpGateway::new(&config.gateway)?;
//! let controller = BranchController::new(gateway, config.story.clone());
//!
//! let controls = NarrativeControls::builder()
//!     .prompt("The Lighthouse Cat")
//!     .num_rounds(2u32)
//!     .build()?;
//! controller.start(controls).await?;
//! controller.select_option(0).await?;
//! controller.select_option(1).await?;
//!
//! let gallery = JsonFileGallery::from_config(&config.gallery);
//! let id = controller.finish(&gallery, "Pip's biggest fan", Visibility::Public).await?;
//! println!("Saved {}", id);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `creativerse_error` - Error types
//! - `creativerse_core` - Chapters, paths, characters, configuration
//! - `creativerse_interface` - `GenerationGateway` and `StoryGallery` traits
//! - `creativerse_narrative` - Branch controller, timeline, tree view
//! - `creativerse_storage` - In-memory and JSON file galleries
//! - `creativerse_models` - HTTP generation gateway
//!
//! This crate re-exports everything for convenience.

pub use creativerse_core::*;
pub use creativerse_error::*;
pub use creativerse_interface::*;
pub use creativerse_models::{GatewayMetrics, HttpGateway};
pub use creativerse_narrative::*;
pub use creativerse_storage::{sample_stories, InMemoryGallery, JsonFileGallery};
