//! Finished stories as they are kept in the gallery.

use crate::{ChapterOption, Character, IllustrationRef, NarrativeControls};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gallery identifier of a saved story.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(format!("story-{}", uuid::Uuid::new_v4()))
    }

    /// Borrow the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Who can see a saved story.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shared with everyone
    #[display("public")]
    Public,
    /// Visible to its author only
    #[display("private")]
    Private,
}

/// A completed story handed off to the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryStory {
    /// Gallery id
    pub id: StoryId,
    /// Title (the story premise)
    pub title: String,
    /// Author name
    pub author: String,
    /// The chosen chapters in reading order
    #[serde(rename = "storyParts")]
    pub chapters: Vec<ChapterOption>,
    /// The realized cast
    pub characters: Vec<Character>,
    /// Controls the story was generated with
    pub controls: NarrativeControls,
    /// Like count
    pub likes: u32,
    /// Public or private
    pub visibility: Visibility,
    /// Save time
    pub created_at: DateTime<Utc>,
    /// Cover art, taken from the first chapter
    #[serde(rename = "coverImageUrl", default)]
    pub cover: Option<IllustrationRef>,
}

impl GalleryStory {
    /// Assemble a story from its finished chapters.
    ///
    /// # Examples
    ///
    /// ```
    /// use creativerse_core::{ChapterOption, GalleryStory, NarrativeControls, Visibility};
    ///
    /// let controls = NarrativeControls::builder().prompt("The Clockwork Dragon").build().unwrap();
    /// let chapters = vec![ChapterOption::new("Gears", "Leo found gears.", "img://gears")];
    /// let story = GalleryStory::new(&controls, chapters, vec![], "You", Visibility::Public);
    ///
    /// assert_eq!(story.title, "The Clockwork Dragon");
    /// assert_eq!(story.cover.as_ref().map(|c| c.as_str()), Some("img://gears"));
    /// assert_eq!(story.likes, 0);
    /// ```
    pub fn new(
        controls: &NarrativeControls,
        chapters: Vec<ChapterOption>,
        characters: Vec<Character>,
        author: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        let cover = chapters.first().map(|c| c.illustration.clone());
        Self {
            id: StoryId::generate(),
            title: controls.prompt().clone(),
            author: author.into(),
            chapters,
            characters,
            controls: controls.clone(),
            likes: 0,
            visibility,
            created_at: Utc::now(),
            cover,
        }
    }

    /// True for publicly shared stories.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
