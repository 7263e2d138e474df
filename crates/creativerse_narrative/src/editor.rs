//! In-place chapter edits.
//!
//! An edit has two halves with independent failure modes: the text change is
//! committed synchronously, and the illustration refresh runs afterwards as a
//! best-effort step. A failed refresh never undoes the text.

use crate::StoryTimeline;
use creativerse_core::{ChapterOption, IllustrationRef, StoryPath};
use creativerse_error::{CreativerseResult, ValidationError, ValidationErrorKind};
use creativerse_interface::{GenerationGateway, IllustrationRequest};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// How an edit ended once its illustration refresh settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text and illustration both updated
    Refreshed,
    /// Text updated, previous illustration kept
    IllustrationKept {
        /// Why the refresh failed
        reason: String,
    },
    /// Text updated, but the story moved on before the new art arrived
    Discarded,
}

/// Commits edits and keeps at most one illustration refresh per node.
#[derive(Debug, Default)]
pub struct NodeEditor {
    in_flight: Arc<Mutex<HashSet<(u64, StoryPath)>>>,
}

impl NodeEditor {
    /// A new editor with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title and body at `path`.
    ///
    /// Returns the updated chapter.
    ///
    /// # Errors
    ///
    /// Rejects the root and any path outside the timeline without
    /// modifying anything.
    pub fn commit_text(
        timeline: &mut StoryTimeline,
        path: &StoryPath,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<ChapterOption, ValidationError> {
        timeline.validate_node_path(path)?;
        let option = timeline
            .option_at_mut(path)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyPath))?;
        option.set_text(title, body);
        debug!(%path, "Committed chapter text");
        Ok(option.clone())
    }

    /// Claim the refresh slot for `path` in timeline generation `epoch`.
    ///
    /// The slot is released when the returned guard drops.
    ///
    /// # Errors
    ///
    /// Fails if a refresh for the same node is already running.
    pub fn begin(&self, epoch: u64, path: &StoryPath) -> Result<RefreshGuard, ValidationError> {
        let key = (epoch, path.clone());
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            return Err(ValidationError::new(ValidationErrorKind::EditInProgress(
                path.to_string(),
            )));
        }
        Ok(RefreshGuard {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    /// True if a refresh for `path` in `epoch` is running.
    pub fn is_refreshing(&self, epoch: u64, path: &StoryPath) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(epoch, path.clone()))
    }

    /// Ask the gateway for art matching the edited text.
    pub async fn refresh_illustration<G>(
        gateway: &G,
        request: &IllustrationRequest,
    ) -> CreativerseResult<IllustrationRef>
    where
        G: GenerationGateway + ?Sized,
    {
        gateway.regenerate_illustration(request).await
    }
}

/// Holds a node's refresh slot until dropped.
#[derive(Debug)]
pub struct RefreshGuard {
    in_flight: Arc<Mutex<HashSet<(u64, StoryPath)>>>,
    key: (u64, StoryPath),
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
