//! Branching-story engine for Creativerse.
//!
//! A story is kept as two flat sequences: every [`RoundOptionSet`] generated
//! so far and the [`StoryPath`] of choices through them ([`StoryTimeline`]).
//! The [`BranchController`] is the only thing that mutates them; the tree a
//! host draws is recomputed on demand by [`materialize`].
//!
//! [`RoundOptionSet`]: creativerse_core::RoundOptionSet
//! [`StoryPath`]: creativerse_core::StoryPath

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod editor;
mod realization;
mod state;
mod timeline;
mod tree;

pub use controller::BranchController;
pub use editor::{EditOutcome, NodeEditor, RefreshGuard};
pub use realization::{realize_characters, RealizedCast};
pub use state::{Banners, StoryPhase, StorySnapshot};
pub use timeline::StoryTimeline;
pub use tree::{materialize, TreeNode};
