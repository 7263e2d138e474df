//! The authoritative record of a story in progress.

use creativerse_core::{ChapterOption, RoundOptionSet, StoryPath};
use creativerse_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// Every option set generated so far plus the path of choices through them.
///
/// `option_sets[i]` holds round `i + 1`; `selection[i]` indexes into it.
/// The selection is never longer than the generated rounds and every step is
/// in range. The tree view and the story-so-far are derived from these two
/// fields on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryTimeline {
    option_sets: Vec<RoundOptionSet>,
    selection: StoryPath,
}

impl StoryTimeline {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// All generated option sets, oldest first.
    pub fn option_sets(&self) -> &[RoundOptionSet] {
        &self.option_sets
    }

    /// The live path of choices.
    pub fn selection(&self) -> &StoryPath {
        &self.selection
    }

    /// Number of rounds generated so far.
    pub fn rounds_generated(&self) -> usize {
        self.option_sets.len()
    }

    /// True before anything has been generated.
    pub fn is_empty(&self) -> bool {
        self.option_sets.is_empty()
    }

    /// Append a freshly generated round.
    pub fn push_option_set(&mut self, set: RoundOptionSet) {
        self.option_sets.push(set);
    }

    /// The newest option set, if it is still waiting for a pick.
    pub fn frontier(&self) -> Option<&RoundOptionSet> {
        if self.option_sets.len() == self.selection.depth() + 1 {
            self.option_sets.last()
        } else {
            None
        }
    }

    /// Pick `index` from the frontier.
    ///
    /// # Errors
    ///
    /// Fails without touching the timeline if there is no frontier or the
    /// index is out of range.
    pub fn select(&mut self, index: usize) -> Result<&ChapterOption, ValidationError> {
        let available = self.frontier().map(RoundOptionSet::len).unwrap_or(0);
        if index >= available {
            return Err(ValidationError::new(
                ValidationErrorKind::OptionIndexOutOfRange { index, available },
            ));
        }
        let depth = self.selection.depth();
        self.selection.push(index);
        Ok(&self.option_sets[depth].options()[index])
    }

    /// The chosen chapters in reading order.
    ///
    /// Always computed from the selection, so in-place edits on the live
    /// path show up here at once.
    pub fn story_so_far(&self) -> Vec<ChapterOption> {
        self.chosen().cloned().collect()
    }

    /// Iterate over the chosen chapters without cloning.
    pub fn chosen(&self) -> impl Iterator<Item = &ChapterOption> + '_ {
        self.selection
            .iter()
            .zip(&self.option_sets)
            .filter_map(|(index, set)| set.get(index))
    }

    /// The deepest chosen chapter.
    pub fn last_chosen(&self) -> Option<&ChapterOption> {
        self.chosen().last()
    }

    /// Check that `path` addresses generated content.
    ///
    /// The empty path is valid and names the root.
    pub fn validate_path(&self, path: &StoryPath) -> Result<(), ValidationError> {
        if path.depth() > self.option_sets.len() {
            return Err(ValidationError::new(ValidationErrorKind::PathTooLong {
                len: path.depth(),
                available: self.option_sets.len(),
            }));
        }
        for (depth, (index, set)) in path.iter().zip(&self.option_sets).enumerate() {
            if index >= set.len() {
                return Err(ValidationError::new(
                    ValidationErrorKind::PathIndexOutOfRange {
                        depth,
                        index,
                        available: set.len(),
                    },
                ));
            }
        }
        Ok(())
    }

    /// Check that `path` addresses a chapter (not the root).
    pub fn validate_node_path(&self, path: &StoryPath) -> Result<(), ValidationError> {
        if path.is_root() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyPath));
        }
        self.validate_path(path)
    }

    /// The chapter at `path`, if it exists.
    pub fn option_at(&self, path: &StoryPath) -> Option<&ChapterOption> {
        let depth = path.depth().checked_sub(1)?;
        self.option_sets.get(depth)?.get(path.last()?)
    }

    /// Mutable access to the chapter at `path`.
    pub fn option_at_mut(&mut self, path: &StoryPath) -> Option<&mut ChapterOption> {
        let depth = path.depth().checked_sub(1)?;
        let index = path.last()?;
        self.option_sets.get_mut(depth)?.get_mut(index)
    }

    /// True when `path` lies on the live selection.
    pub fn is_on_selection(&self, path: &StoryPath) -> bool {
        path.is_prefix_of(&self.selection)
    }

    /// Rewind to `target`, discarding every round generated after it.
    ///
    /// # Errors
    ///
    /// Fails without touching the timeline if `target` is invalid.
    pub fn truncate_to(&mut self, target: &StoryPath) -> Result<(), ValidationError> {
        self.validate_path(target)?;
        self.option_sets.truncate(target.depth());
        self.selection = target.clone();
        Ok(())
    }

    /// Empty the timeline.
    pub fn clear(&mut self) {
        self.option_sets.clear();
        self.selection = StoryPath::root();
    }
}
