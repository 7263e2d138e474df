//! Chapter options and the round option sets that carry them.

use serde::{Deserialize, Serialize};

/// Opaque handle to generated media (a URL or a `data:` URI).
///
/// # Examples
///
/// ```
/// use creativerse_core::IllustrationRef;
///
/// let inline = IllustrationRef::from_base64_jpeg("/9j/4AAQ");
/// assert!(inline.is_inline());
/// assert_eq!(inline.as_str(), "data:image/jpeg;base64,/9j/4AAQ");
///
/// // Already-prefixed payloads are left alone.
/// let same = IllustrationRef::from_base64_jpeg(inline.as_str());
/// assert_eq!(same, inline);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct IllustrationRef(String);

impl IllustrationRef {
    /// Wrap an existing handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Build an inline JPEG reference from a bare base64 payload.
    pub fn from_base64_jpeg(payload: &str) -> Self {
        if payload.starts_with("data:") {
            Self(payload.to_string())
        } else {
            Self(format!("data:image/jpeg;base64,{}", payload))
        }
    }

    /// Borrow the handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `data:` URIs that embed the image bytes.
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl From<String> for IllustrationRef {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl From<&str> for IllustrationRef {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

/// One generated candidate for a story beat.
///
/// Content only changes through the node editor, which rewrites the fields
/// in place; the option keeps its position (and so its identity) in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOption {
    /// Short headline
    pub title: String,
    /// Chapter paragraph
    pub body: String,
    /// Illustration for the chapter
    #[serde(rename = "imageUrl", alias = "illustration")]
    pub illustration: IllustrationRef,
}

impl ChapterOption {
    /// Create a chapter option.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        illustration: impl Into<IllustrationRef>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            illustration: illustration.into(),
        }
    }

    /// Title and body joined the way they are fed back to the generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use creativerse_core::ChapterOption;
    ///
    /// let option = ChapterOption::new("The Door", "It creaked open.", "img://1");
    /// assert_eq!(option.text(), "The Door It creaked open.");
    /// ```
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    /// Replace title and body, keeping the illustration.
    pub fn set_text(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
    }
}

/// The ordered batch of chapter options offered at one round.
///
/// Order is display order only. The set is never replaced as a whole once
/// generated; individual options may be edited through [`Self::get_mut`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundOptionSet(Vec<ChapterOption>);

impl RoundOptionSet {
    /// Wrap a batch of generated options.
    pub fn new(options: Vec<ChapterOption>) -> Self {
        Self(options)
    }

    /// Number of options in the round.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the round has no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option at `index`.
    pub fn get(&self, index: usize) -> Option<&ChapterOption> {
        self.0.get(index)
    }

    /// Mutable option at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ChapterOption> {
        self.0.get_mut(index)
    }

    /// All options in display order.
    pub fn options(&self) -> &[ChapterOption] {
        &self.0
    }

    /// Iterate over options in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChapterOption> {
        self.0.iter()
    }
}

impl From<Vec<ChapterOption>> for RoundOptionSet {
    fn from(options: Vec<ChapterOption>) -> Self {
        Self(options)
    }
}

impl<'a> IntoIterator for &'a RoundOptionSet {
    type Item = &'a ChapterOption;
    type IntoIter = std::slice::Iter<'a, ChapterOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_serializes_with_image_url() {
        let option = ChapterOption::new("A", "B", "https://img/1.png");
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["imageUrl"], "https://img/1.png");

        let back: ChapterOption = serde_json::from_value(json).unwrap();
        assert_eq!(back, option);
    }

    #[test]
    fn test_option_set_is_transparent_array() {
        let set = RoundOptionSet::new(vec![
            ChapterOption::new("A1", "a", "i1"),
            ChapterOption::new("A2", "b", "i2"),
        ]);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_set_text_keeps_illustration() {
        let mut option = ChapterOption::new("Old", "old body", "img");
        option.set_text("New", "new body");
        assert_eq!(option.title, "New");
        assert_eq!(option.body, "new body");
        assert_eq!(option.illustration.as_str(), "img");
    }
}
