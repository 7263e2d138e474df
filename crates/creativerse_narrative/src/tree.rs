//! Read-only tree view derived from a [`StoryTimeline`].

use crate::StoryTimeline;
use creativerse_core::{ChapterOption, StoryPath};
use serde::{Deserialize, Serialize};

/// One node of the materialized story tree.
///
/// The root has an empty path and no content. Only nodes on the selection
/// path have children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Address of this node
    pub path: StoryPath,
    /// The chapter here, `None` at the root
    pub content: Option<ChapterOption>,
    /// Whether the live story passes through this node
    pub is_on_selection_path: bool,
    /// Child nodes in option order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Find the node at `path` beneath this one.
    pub fn find(&self, path: &StoryPath) -> Option<&TreeNode> {
        if !self.path.is_prefix_of(path) {
            return None;
        }
        let mut node = self;
        for index in path.iter().skip(self.path.depth()) {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// The child the live story continues through.
    pub fn chosen_child(&self) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.is_on_selection_path)
    }

    /// Nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// True if this node has no materialized children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Project a timeline into its tree view.
///
/// Pure and deterministic: the same timeline always yields an equal tree.
///
/// # Examples
///
/// ```
/// use creativerse_core::{ChapterOption, RoundOptionSet};
/// use creativerse_narrative::{materialize, StoryTimeline};
///
/// let mut timeline = StoryTimeline::new();
/// timeline.push_option_set(RoundOptionSet::from(vec![
///     ChapterOption::new("A1", "a", "img://a1"),
///     ChapterOption::new("A2", "a", "img://a2"),
/// ]));
///
/// let root = materialize(&timeline);
/// assert_eq!(root.children.len(), 2);
/// assert!(root.chosen_child().is_none());
/// ```
pub fn materialize(timeline: &StoryTimeline) -> TreeNode {
    build(timeline, StoryPath::root(), None, true)
}

fn build(
    timeline: &StoryTimeline,
    path: StoryPath,
    content: Option<ChapterOption>,
    on_path: bool,
) -> TreeNode {
    let depth = path.depth();
    let children = match timeline.option_sets().get(depth) {
        Some(set) if on_path => {
            let chosen = timeline.selection().get(depth);
            set.iter()
                .enumerate()
                .map(|(index, option)| {
                    build(
                        timeline,
                        path.child(index),
                        Some(option.clone()),
                        chosen == Some(index),
                    )
                })
                .collect()
        }
        _ => Vec::new(),
    };

    TreeNode {
        path,
        content,
        is_on_selection_path: on_path,
        children,
    }
}
