//! Positional addressing of chapter options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered zero-based option indices, one per round.
///
/// A path of length `n` addresses the option chosen at round `n`, reached by
/// walking into each round's option set along the earlier indices. The empty
/// path is the root of the story tree.
///
/// # Examples
///
/// ```
/// use creativerse_core::StoryPath;
///
/// let path: StoryPath = "0-2-1".parse().unwrap();
/// assert_eq!(path.depth(), 3);
/// assert_eq!(path.last(), Some(1));
/// assert_eq!(path.parent().to_string(), "0-2");
/// assert!(StoryPath::from(vec![0, 2]).is_prefix_of(&path));
/// assert_eq!(StoryPath::root().to_string(), "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryPath(Vec<usize>);

impl StoryPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Number of rounds this path spans.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The indices, one per round.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Index at round `depth` (zero-based).
    pub fn get(&self, depth: usize) -> Option<usize> {
        self.0.get(depth).copied()
    }

    /// Index chosen at the deepest round.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path with the deepest step removed. The root is its own parent.
    pub fn parent(&self) -> Self {
        let mut indices = self.0.clone();
        indices.pop();
        Self(indices)
    }

    /// Path extended by one step.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Extend this path in place.
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// The first `len` steps (the whole path if shorter).
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// True when `other` starts with every step of `self`.
    pub fn is_prefix_of(&self, other: &StoryPath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Iterate over the indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<usize>> for StoryPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for StoryPath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for StoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl std::str::FromStr for StoryPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "root" {
            return Ok(Self::root());
        }
        trimmed
            .split('-')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid path step '{}': {}", part, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("0-x".parse::<StoryPath>().is_err());
        assert!("-1".parse::<StoryPath>().is_err());
    }

    #[test]
    fn test_prefix_clamps() {
        let path = StoryPath::from(vec![1, 0]);
        assert_eq!(path.prefix(1), StoryPath::from(vec![1]));
        assert_eq!(path.prefix(5), path);
        assert!(path.prefix(0).is_root());
    }

    #[test]
    fn test_root_is_prefix_of_everything() {
        assert!(StoryPath::root().is_prefix_of(&StoryPath::from(vec![2, 2])));
        assert!(!StoryPath::from(vec![1]).is_prefix_of(&StoryPath::from(vec![0, 1])));
    }
}
