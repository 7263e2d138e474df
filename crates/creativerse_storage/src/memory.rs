//! Process-lifetime gallery.

use crate::increment_likes;
use creativerse_core::{GalleryStory, StoryId};
use creativerse_error::CreativerseResult;
use creativerse_interface::{GalleryFilter, StoryGallery};
use tokio::sync::RwLock;

/// Gallery held in memory. Stories are lost when it drops.
#[derive(Debug, Default)]
pub struct InMemoryGallery {
    stories: RwLock<Vec<GalleryStory>>,
}

impl InMemoryGallery {
    /// An empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `stories` if the gallery holds nothing yet.
    ///
    /// Returns true if the stories were added.
    pub async fn seed_if_empty(&self, stories: Vec<GalleryStory>) -> CreativerseResult<bool> {
        let mut current = self.stories.write().await;
        if !current.is_empty() {
            return Ok(false);
        }
        tracing::debug!(count = stories.len(), "Seeding in-memory gallery");
        *current = stories;
        Ok(true)
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// True if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl StoryGallery for InMemoryGallery {
    #[tracing::instrument(skip(self, story), fields(id = %story.id))]
    async fn save(&self, story: &GalleryStory) -> CreativerseResult<StoryId> {
        self.stories.write().await.insert(0, story.clone());
        tracing::debug!("Saved story");
        Ok(story.id.clone())
    }

    async fn list(&self, filter: GalleryFilter) -> CreativerseResult<Vec<GalleryStory>> {
        Ok(self
            .stories
            .read()
            .await
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn like(&self, id: &StoryId) -> CreativerseResult<u32> {
        let mut stories = self.stories.write().await;
        increment_likes(&mut stories, id)
    }

    async fn get(&self, id: &StoryId) -> CreativerseResult<Option<GalleryStory>> {
        Ok(self
            .stories
            .read()
            .await
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }
}
