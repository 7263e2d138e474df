//! Persistent storage for finished stories.

use async_trait::async_trait;
use creativerse_core::{GalleryStory, StoryId, Visibility};
use creativerse_error::CreativerseResult;
use serde::{Deserialize, Serialize};

/// Which stories a gallery listing returns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GalleryFilter {
    /// Public stories only
    #[default]
    #[display("public")]
    Public,
    /// Private stories only
    #[display("private")]
    Private,
    /// Everything
    #[display("all")]
    All,
}

impl GalleryFilter {
    /// True if `story` passes this filter.
    pub fn matches(&self, story: &GalleryStory) -> bool {
        match self {
            GalleryFilter::Public => story.visibility == Visibility::Public,
            GalleryFilter::Private => story.visibility == Visibility::Private,
            GalleryFilter::All => true,
        }
    }
}

impl std::str::FromStr for GalleryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(GalleryFilter::Public),
            "private" => Ok(GalleryFilter::Private),
            "all" => Ok(GalleryFilter::All),
            _ => Err(format!("Unknown gallery filter: {}", s)),
        }
    }
}

/// Key-value store of completed stories.
///
/// Listings are newest first.
#[async_trait]
pub trait StoryGallery: Send + Sync {
    /// Store a story and return its id.
    async fn save(&self, story: &GalleryStory) -> CreativerseResult<StoryId>;

    /// Stories passing `filter`, newest first.
    async fn list(&self, filter: GalleryFilter) -> CreativerseResult<Vec<GalleryStory>>;

    /// Add a like and return the new count.
    ///
    /// # Errors
    ///
    /// Returns a not-found storage error for an unknown id.
    async fn like(&self, id: &StoryId) -> CreativerseResult<u32>;

    /// Look up one story.
    async fn get(&self, id: &StoryId) -> CreativerseResult<Option<GalleryStory>>;
}
