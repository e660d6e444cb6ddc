//! Positional addressing for outline nodes.
//!
//! A `NodePath` locates a node by walking sibling-list indices from the
//! document roots, e.g. `1-0` is the first child of the second root entry.
//! Paths are transient coordinates, not identities: any insert or removal at
//! or before an index along the path invalidates paths computed earlier.
//! Nothing in this crate stores a path across mutations without re-resolving.

use std::fmt;

use itertools::Itertools;

use crate::errors::{OutlineError, OutlineResult};

/// Sibling index at each depth from the document roots.
///
/// The canonical external form is the dash-joined key (`"2"`, `"1-0-3"`),
/// which every collaborator uses to identify targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Parse the dash-joined key form.
    pub fn from_key(key: &str) -> OutlineResult<Self> {
        if key.is_empty() {
            return Err(OutlineError::InvalidKey(key.to_string()));
        }
        let indices = key
            .split('-')
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| OutlineError::InvalidKey(key.to_string()))
            })
            .collect::<OutlineResult<Vec<usize>>>()?;
        Ok(Self(indices))
    }

    /// Canonical dash-joined key form.
    pub fn key(&self) -> String {
        self.0.iter().join("-")
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Split into the enclosing container path and the index within it.
    /// `None` for the empty path, which addresses no node.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (&index, container) = self.0.split_last()?;
        Some((NodePath(container.to_vec()), index))
    }

    /// Extend with one more sibling index.
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Strictly below `other` in the tree (equal paths are not descendants).
    pub fn is_descendant_of(&self, other: &NodePath) -> bool {
        self.len() > other.len() && self.starts_with(other)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
