//! Outline tree model: nodes, documents, and path resolution.

use std::fmt;

use crate::errors::{OutlineError, OutlineResult};
use crate::path::NodePath;

/// Discriminant of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Feed,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => write!(f, "folder"),
            NodeKind::Feed => write!(f, "feed"),
        }
    }
}

/// One entry in the outline tree.
///
/// Modelled as a sum type so that a feed structurally cannot carry children
/// and URL fields cannot exist on a folder. For folders, `children: None`
/// means the node never had a children container (parsed from a self-closed
/// element), while `Some(vec![])` is an explicit empty folder created by an
/// edit; both serialize as a self-closed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineNode {
    Folder {
        label: String,
        children: Option<Vec<OutlineNode>>,
    },
    Feed {
        label: String,
        feed_url: Option<String>,
        site_url: Option<String>,
    },
}

impl OutlineNode {
    pub fn folder(label: impl Into<String>, children: Option<Vec<OutlineNode>>) -> Self {
        OutlineNode::Folder {
            label: label.into(),
            children,
        }
    }

    pub fn feed(
        label: impl Into<String>,
        feed_url: Option<String>,
        site_url: Option<String>,
    ) -> Self {
        OutlineNode::Feed {
            label: label.into(),
            feed_url,
            site_url,
        }
    }

    /// Default node for the add operation.
    pub fn default_of_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Folder => OutlineNode::folder("New Folder", Some(Vec::new())),
            NodeKind::Feed => OutlineNode::feed(
                "New RSS Feed",
                Some("http://example.com/feed.xml".to_string()),
                Some("http://example.com".to_string()),
            ),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            OutlineNode::Folder { .. } => NodeKind::Folder,
            OutlineNode::Feed { .. } => NodeKind::Feed,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn label(&self) -> &str {
        match self {
            OutlineNode::Folder { label, .. } | OutlineNode::Feed { label, .. } => label,
        }
    }

    pub fn set_label(&mut self, new_label: impl Into<String>) {
        match self {
            OutlineNode::Folder { label, .. } | OutlineNode::Feed { label, .. } => {
                *label = new_label.into();
            }
        }
    }

    /// Child sequence, if this node has one. Feeds never do.
    pub fn children(&self) -> Option<&[OutlineNode]> {
        match self {
            OutlineNode::Folder { children, .. } => children.as_deref(),
            OutlineNode::Feed { .. } => None,
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .unwrap_or(&[])
            .iter()
            .map(OutlineNode::subtree_len)
            .sum::<usize>()
    }
}

/// An ordered sequence of root-level outline nodes.
///
/// Every operation in [`crate::mutation`] and [`crate::reorder`] treats a
/// `Document` as an immutable snapshot and produces a new one; cloning is the
/// copy-on-write mechanism, so no node is ever shared between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub roots: Vec<OutlineNode>,
}

impl Document {
    pub fn new(roots: Vec<OutlineNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across all subtrees.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(OutlineNode::subtree_len).sum()
    }

    /// Walk the path through nested children to the addressed node.
    ///
    /// Fails with `PathNotFound` when any index is out of range, when a
    /// non-terminal step addresses a node with an absent or too-short child
    /// sequence, or when the path is empty.
    pub fn resolve(&self, path: &NodePath) -> OutlineResult<&OutlineNode> {
        let mut siblings: &[OutlineNode] = &self.roots;
        let mut found: Option<&OutlineNode> = None;

        for &index in path.indices() {
            let node = siblings.get(index).ok_or_else(|| OutlineError::PathNotFound {
                key: path.key(),
            })?;
            siblings = node.children().unwrap_or(&[]);
            found = Some(node);
        }

        found.ok_or_else(|| OutlineError::PathNotFound { key: path.key() })
    }

    pub(crate) fn resolve_mut(&mut self, path: &NodePath) -> OutlineResult<&mut OutlineNode> {
        let (container, index) = path
            .split_last()
            .ok_or_else(|| OutlineError::PathNotFound { key: path.key() })?;
        let siblings = self.container_mut(&container, false)?;
        siblings
            .get_mut(index)
            .ok_or_else(|| OutlineError::PathNotFound { key: path.key() })
    }

    /// Mutable access to the sibling sequence held by the node at
    /// `container` (the root sequence for the empty path).
    ///
    /// With `create_missing`, absent child sequences along the walk are
    /// initialized to empty ones; otherwise an absent sequence fails the
    /// resolution. A feed along the walk always fails: feeds have no
    /// children to descend into.
    pub(crate) fn container_mut(
        &mut self,
        container: &NodePath,
        create_missing: bool,
    ) -> OutlineResult<&mut Vec<OutlineNode>> {
        let mut siblings: &mut Vec<OutlineNode> = &mut self.roots;

        for &index in container.indices() {
            let node = siblings
                .get_mut(index)
                .ok_or_else(|| OutlineError::PathNotFound {
                    key: container.key(),
                })?;
            match node {
                OutlineNode::Folder { children, .. } => {
                    if children.is_none() && create_missing {
                        *children = Some(Vec::new());
                    }
                    match children {
                        Some(next) => siblings = next,
                        None => {
                            return Err(OutlineError::PathNotFound {
                                key: container.key(),
                            })
                        }
                    }
                }
                OutlineNode::Feed { .. } => {
                    return Err(OutlineError::PathNotFound {
                        key: container.key(),
                    })
                }
            }
        }

        Ok(siblings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(vec![
            OutlineNode::folder(
                "Tech",
                Some(vec![OutlineNode::feed(
                    "A",
                    Some("u1".to_string()),
                    None,
                )]),
            ),
            OutlineNode::feed("News", Some("u2".to_string()), None),
        ])
    }

    #[test]
    fn given_valid_path_when_resolving_then_returns_node() {
        let doc = sample();
        let node = doc.resolve(&NodePath::new(vec![0, 0])).unwrap();
        assert_eq!(node.label(), "A");
    }

    #[test]
    fn given_out_of_range_index_when_resolving_then_path_not_found() {
        let doc = sample();
        assert!(doc.resolve(&NodePath::new(vec![2])).is_err());
        assert!(doc.resolve(&NodePath::new(vec![0, 1])).is_err());
    }

    #[test]
    fn given_feed_on_walk_when_resolving_then_path_not_found() {
        let doc = sample();
        // roots[1] is a feed, it has no children to descend into
        assert!(doc.resolve(&NodePath::new(vec![1, 0])).is_err());
    }

    #[test]
    fn given_empty_path_when_resolving_then_path_not_found() {
        let doc = sample();
        assert!(doc.resolve(&NodePath::new(vec![])).is_err());
    }

    #[test]
    fn given_tree_when_counting_then_counts_whole_subtrees() {
        let doc = sample();
        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.roots[0].subtree_len(), 2);
    }

    #[test]
    fn given_absent_children_when_container_mut_creates_then_initializes_empty() {
        let mut doc = Document::new(vec![OutlineNode::folder("Empty", None)]);
        let container = NodePath::new(vec![0]);
        assert!(doc.container_mut(&container, false).is_err());
        let siblings = doc.container_mut(&container, true).unwrap();
        assert!(siblings.is_empty());
        assert_eq!(doc.roots[0].children(), Some(&[][..]));
    }
}
