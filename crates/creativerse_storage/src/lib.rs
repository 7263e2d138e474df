//! Story gallery backends for Creativerse.
//!
//! Two [`StoryGallery`] implementations:
//!
//! - [`InMemoryGallery`] keeps stories for the life of the process
//! - [`JsonFileGallery`] keeps every story in one JSON document on disk,
//!   rewritten atomically (temp file + rename) on each change
//!
//! Both list newest first and can be seeded with [`sample_stories`] so a
//! fresh gallery has something to browse.
//!
//! # Example
//!
//! ```rust
//! use creativerse_interface::{GalleryFilter, StoryGallery};
//! use creativerse_storage::{sample_stories, InMemoryGallery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gallery = InMemoryGallery::new();
//! gallery.seed_if_empty(sample_stories()?).await?;
//!
//! let public = gallery.list(GalleryFilter::Public).await?;
//! let likes = gallery.like(&public[0].id).await?;
//! assert_eq!(likes, public[0].likes + 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod json_file;
mod memory;
mod samples;

pub use creativerse_error::{StorageError, StorageErrorKind};
pub use json_file::JsonFileGallery;
pub use memory::InMemoryGallery;
pub use samples::sample_stories;

use creativerse_core::{GalleryStory, StoryId};
use creativerse_error::CreativerseResult;

/// Add one like to the story with `id` in `stories`.
fn increment_likes(stories: &mut [GalleryStory], id: &StoryId) -> CreativerseResult<u32> {
    let story = stories
        .iter_mut()
        .find(|s| &s.id == id)
        .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;
    story.likes += 1;
    Ok(story.likes)
}
