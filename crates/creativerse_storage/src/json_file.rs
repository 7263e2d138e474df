//! Gallery persisted as a single JSON document.

use crate::increment_likes;
use creativerse_core::{GalleryConfig, GalleryStory, StoryId};
use creativerse_error::{CreativerseResult, StorageError, StorageErrorKind};
use creativerse_interface::{GalleryFilter, StoryGallery};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Gallery stored in one JSON file.
///
/// The file holds an array of stories, newest first. It is created on the
/// first write; a missing file reads as an empty gallery. Every change
/// rewrites the whole document through a temp file and a rename, so a crash
/// mid-write leaves the previous version intact.
#[derive(Debug)]
pub struct JsonFileGallery {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileGallery {
    /// A gallery backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// A gallery at the configured path.
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.path())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `stories` if the file is missing or empty.
    ///
    /// Returns true if the stories were written.
    #[tracing::instrument(skip(self, stories), fields(path = %self.path.display(), count = stories.len()))]
    pub async fn seed_if_empty(&self, stories: Vec<GalleryStory>) -> CreativerseResult<bool> {
        let _guard = self.write_lock.lock().await;
        if !self.read_all().await?.is_empty() {
            return Ok(false);
        }
        self.write_all(&stories).await?;
        tracing::info!("Seeded gallery");
        Ok(true)
    }

    async fn read_all(&self) -> CreativerseResult<Vec<GalleryStory>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stories = serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        Ok(stories)
    }

    async fn write_all(&self, stories: &[GalleryStory]) -> CreativerseResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let json = serde_json::to_string_pretty(stories)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %self.path.display(), count = stories.len(), "Wrote gallery");
        Ok(())
    }
}

#[async_trait::async_trait]
impl StoryGallery for JsonFileGallery {
    #[tracing::instrument(skip(self, story), fields(id = %story.id, path = %self.path.display()))]
    async fn save(&self, story: &GalleryStory) -> CreativerseResult<StoryId> {
        let _guard = self.write_lock.lock().await;
        let mut stories = self.read_all().await?;
        stories.insert(0, story.clone());
        self.write_all(&stories).await?;

        tracing::info!(title = %story.title, "Saved story");
        Ok(story.id.clone())
    }

    async fn list(&self, filter: GalleryFilter) -> CreativerseResult<Vec<GalleryStory>> {
        let stories = self.read_all().await?;
        Ok(stories.into_iter().filter(|s| filter.matches(s)).collect())
    }

    #[tracing::instrument(skip(self), fields(id = %id, path = %self.path.display()))]
    async fn like(&self, id: &StoryId) -> CreativerseResult<u32> {
        let _guard = self.write_lock.lock().await;
        let mut stories = self.read_all().await?;
        let likes = increment_likes(&mut stories, id)?;
        self.write_all(&stories).await?;
        Ok(likes)
    }

    async fn get(&self, id: &StoryId) -> CreativerseResult<Option<GalleryStory>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .find(|s| &s.id == id))
    }
}
