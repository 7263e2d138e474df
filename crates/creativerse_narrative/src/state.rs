//! Controller phases and the user-facing state a host renders.

use crate::StoryTimeline;
use creativerse_core::{Character, NarrativeControls};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where the branch controller is in a story's lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StoryPhase {
    /// No story in progress
    #[default]
    #[display("idle")]
    Idle,
    /// A round is being generated
    #[display("loading")]
    Loading,
    /// The newest round awaits a pick
    #[display("waiting for a choice")]
    OptionsReady,
    /// Every round has been chosen
    #[display("complete")]
    Complete,
}

/// Dismissible messages for the user.
///
/// Errors and informational notices travel on separate channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banners {
    /// The latest error, if not yet dismissed
    pub error: Option<String>,
    /// Informational notices, oldest first
    pub notifications: Vec<String>,
}

impl Banners {
    /// Drop both the error and the notifications.
    pub fn clear(&mut self) {
        self.error = None;
        self.notifications.clear();
    }

    /// Replace the current error.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Append a notification.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(message.into());
    }

    /// True if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.notifications.is_empty()
    }
}

/// A consistent copy of everything the controller holds.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct StorySnapshot {
    /// Current phase
    phase: StoryPhase,
    /// Option sets and selection
    timeline: StoryTimeline,
    /// The active cast
    roster: Vec<Character>,
    /// Controls of the running story
    controls: Option<NarrativeControls>,
    /// Pending banners
    banners: Banners,
    /// Timeline generation counter
    epoch: u64,
}

impl StorySnapshot {
    pub(crate) fn new(
        phase: StoryPhase,
        timeline: StoryTimeline,
        roster: Vec<Character>,
        controls: Option<NarrativeControls>,
        banners: Banners,
        epoch: u64,
    ) -> Self {
        Self {
            phase,
            timeline,
            roster,
            controls,
            banners,
            epoch,
        }
    }
}
