//! Mutation engine: select, edit, add, delete.
//!
//! Every operation takes the current document snapshot and returns a new
//! one; the input is never touched. UI-facing side effects (selection
//! clearing, expansion marking) live in [`crate::session`], not here.

use tracing::debug;

use crate::errors::{OutlineError, OutlineResult};
use crate::outline::{Document, NodeKind, OutlineNode};
use crate::path::NodePath;

/// Field updates for the edit operation.
///
/// `None` leaves a field unchanged. The URL fields are applied only when
/// the target is a feed; on a folder they are silently ignored, which is a
/// deliberate contract rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditValues {
    pub label: Option<String>,
    pub feed_url: Option<String>,
    pub site_url: Option<String>,
}

/// Resolve the node at `path`, surfacing `PathNotFound` to the caller.
pub fn select<'a>(document: &'a Document, path: &NodePath) -> OutlineResult<&'a OutlineNode> {
    document.resolve(path)
}

/// Apply label and URL edits to the node at `path`.
pub fn edit(document: &Document, path: &NodePath, values: &EditValues) -> OutlineResult<Document> {
    let mut next = document.clone();
    let node = next.resolve_mut(path)?;

    if let Some(label) = &values.label {
        node.set_label(label.clone());
    }
    if let OutlineNode::Feed {
        feed_url, site_url, ..
    } = node
    {
        if let Some(url) = &values.feed_url {
            *feed_url = Some(url.clone());
        }
        if let Some(url) = &values.site_url {
            *site_url = Some(url.clone());
        }
    }

    Ok(next)
}

/// Insert a default node of `kind` into the children of the node at
/// `target`, or into the root sequence when no target is given.
///
/// Folders are inserted at the front of the sequence, feeds appended at the
/// end. An absent children container on the target folder is created; a
/// feed target fails with `PathNotFound` since feeds cannot hold children.
pub fn add(
    document: &Document,
    target: Option<&NodePath>,
    kind: NodeKind,
) -> OutlineResult<Document> {
    let mut next = document.clone();
    let node = OutlineNode::default_of_kind(kind);

    let container = match target {
        Some(path) => next.container_mut(path, true)?,
        None => &mut next.roots,
    };
    match kind {
        NodeKind::Folder => container.insert(0, node),
        NodeKind::Feed => container.push(node),
    }

    debug!(kind = %kind, target = ?target.map(NodePath::key), "added node");
    Ok(next)
}

/// Remove the node at `path` together with its entire subtree.
pub fn delete(document: &Document, path: &NodePath) -> OutlineResult<Document> {
    let (container_path, index) = path
        .split_last()
        .ok_or_else(|| OutlineError::PathNotFound { key: path.key() })?;

    let mut next = document.clone();
    let container = next.container_mut(&container_path, false)?;
    if index >= container.len() {
        return Err(OutlineError::PathNotFound { key: path.key() });
    }
    let removed = container.remove(index);

    debug!(path = %path, subtree = removed.subtree_len(), "deleted node");
    Ok(next)
}
