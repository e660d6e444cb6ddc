//! Reorder engine: the drag-and-drop move algorithm.
//!
//! A move decomposes source and destination paths into (container, index)
//! pairs, splices the node out of its source sequence and into the
//! destination sequence, then passes the destination sequence through a
//! stable folders-before-feeds reorder. Dropping onto a folder node
//! redirects the destination to index 0 of that folder's children.

use tracing::debug;

use crate::errors::{OutlineError, OutlineResult};
use crate::outline::{Document, NodeKind, OutlineNode};
use crate::path::NodePath;

/// Result of a move: the new snapshot, the moved node's resting path after
/// the sort-invariant reorder, and the folder auto-expanded by a
/// drop-on-folder redirection, if any. The expansion is a UI-facing side
/// effect applied by [`crate::session`], not part of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub document: Document,
    pub new_path: NodePath,
    pub expanded_folder: Option<NodePath>,
}

/// Move the node at `source` to `dest`.
///
/// `dest` either names a gap in a sibling sequence (container path plus
/// insertion index) or a folder node, in which case the node is placed at
/// index 0 inside that folder. Moving a node onto itself is a no-op;
/// moving a folder into its own subtree fails with `InvalidMove` and
/// leaves the tree unchanged.
pub fn move_node(
    document: &Document,
    source: &NodePath,
    dest: &NodePath,
) -> OutlineResult<MoveOutcome> {
    if source == dest {
        return Ok(MoveOutcome {
            document: document.clone(),
            new_path: source.clone(),
            expanded_folder: None,
        });
    }

    // The move must start from an existing node.
    document.resolve(source)?;

    if dest.is_descendant_of(source) {
        return Err(OutlineError::InvalidMove {
            src: source.key(),
            dest: dest.key(),
        });
    }

    let (source_container, source_index) = source
        .split_last()
        .ok_or_else(|| OutlineError::PathNotFound { key: source.key() })?;

    // Drop-on-folder redirection: a destination that resolves to a folder
    // node means "into that folder, first position".
    let (dest_container, dest_index, expanded_folder) = match document.resolve(dest) {
        Ok(node) if node.is_folder() => (dest.clone(), 0, Some(dest.clone())),
        _ => {
            let (container, index) = dest
                .split_last()
                .ok_or_else(|| OutlineError::PathNotFound { key: dest.key() })?;
            (container, index, None)
        }
    };

    let mut next = document.clone();
    let final_index;

    if source_container == dest_container {
        // Same container: remove first, then insert at the literal
        // destination index of the already-shortened sequence.
        let siblings = next.container_mut(&source_container, false)?;
        if source_index >= siblings.len() {
            return Err(OutlineError::PathNotFound { key: source.key() });
        }
        let moved = siblings.remove(source_index);
        let insert_at = dest_index.min(siblings.len());
        siblings.insert(insert_at, moved);
        final_index = folders_first_tracking(siblings, insert_at);
    } else {
        let siblings = next.container_mut(&source_container, false)?;
        if source_index >= siblings.len() {
            return Err(OutlineError::PathNotFound { key: source.key() });
        }
        let moved = siblings.remove(source_index);
        // The destination is walked on the shortened tree; paths are
        // transient coordinates computed against the pre-move snapshot, so
        // a destination beneath a later sibling of the source shifts with
        // the removal. Absent child sequences along the walk are created.
        let target = next.container_mut(&dest_container, true)?;
        let insert_at = dest_index.min(target.len());
        target.insert(insert_at, moved);
        final_index = folders_first_tracking(target, insert_at);
    }

    let new_path = dest_container.child(final_index);
    debug!(source = %source, dest = %dest, new_path = %new_path, "moved node");

    Ok(MoveOutcome {
        document: next,
        new_path,
        expanded_folder,
    })
}

/// Stable partial reorder of a sibling sequence: all folders before all
/// feeds, relative order within each class preserved.
pub fn folders_first(siblings: &mut Vec<OutlineNode>) {
    folders_first_tracking(siblings, 0);
}

/// Same as [`folders_first`], returning the new index of the element that
/// was at `tracked` before the reorder.
fn folders_first_tracking(siblings: &mut Vec<OutlineNode>, tracked: usize) -> usize {
    let items = std::mem::take(siblings);
    let mut folders = Vec::new();
    let mut feeds = Vec::new();
    let mut tracked_kind = NodeKind::Feed;
    let mut tracked_class_index = 0;

    for (index, node) in items.into_iter().enumerate() {
        let class = match node.kind() {
            NodeKind::Folder => &mut folders,
            NodeKind::Feed => &mut feeds,
        };
        if index == tracked {
            tracked_kind = node.kind();
            tracked_class_index = class.len();
        }
        class.push(node);
    }

    let folder_count = folders.len();
    siblings.extend(folders);
    siblings.extend(feeds);

    match tracked_kind {
        NodeKind::Folder => tracked_class_index,
        NodeKind::Feed => folder_count + tracked_class_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(label: &str) -> OutlineNode {
        OutlineNode::feed(label, None, None)
    }

    fn folder(label: &str) -> OutlineNode {
        OutlineNode::folder(label, None)
    }

    #[test]
    fn given_mixed_sequence_when_sorting_then_folders_lead_stably() {
        let mut siblings = vec![feed("f1"), folder("d1"), feed("f2"), folder("d2")];
        folders_first(&mut siblings);
        let labels: Vec<&str> = siblings.iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["d1", "d2", "f1", "f2"]);
    }

    #[test]
    fn given_tracked_feed_when_sorting_then_reports_new_index() {
        let mut siblings = vec![feed("f1"), folder("d1"), feed("f2")];
        // track the feed at index 0; after the reorder it sits behind d1
        let new_index = folders_first_tracking(&mut siblings, 0);
        assert_eq!(new_index, 1);
        assert_eq!(siblings[new_index].label(), "f1");
    }
}
