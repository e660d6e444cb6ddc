//! Editing session: the document plus the UI-facing side channel.
//!
//! Selection, the expanded-folder set, and the in-flight drag are ephemeral
//! state outside the document value. They are updated by the same operation
//! calls that produce new snapshots but are never serialized. Expansion
//! entries are keyed by path and may go stale after mutations; stale keys
//! are harmless since lookups for them simply miss.

use std::collections::HashSet;

use tracing::debug;

use crate::codec;
use crate::errors::OutlineResult;
use crate::mutation::{self, EditValues};
use crate::outline::{Document, NodeKind, OutlineNode};
use crate::path::NodePath;
use crate::reorder;

#[derive(Debug, Default)]
pub struct Session {
    document: Document,
    selected: Option<NodePath>,
    expanded: HashSet<NodePath>,
    dragging: Option<NodePath>,
}

impl Session {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    /// Replace the document with the parsed input. On a parse failure the
    /// current document is left untouched and the error is surfaced.
    pub fn import(&mut self, text: &str) -> OutlineResult<()> {
        let document = codec::parse(text)?;
        self.document = document;
        Ok(())
    }

    pub fn export(&self) -> String {
        codec::serialize(&self.document)
    }

    /// Select the node at `path`; fails with `PathNotFound` on a stale path.
    pub fn select(&mut self, path: &NodePath) -> OutlineResult<()> {
        mutation::select(&self.document, path)?;
        self.selected = Some(path.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply edits to the selected node; without a selection this is a no-op.
    pub fn edit_selected(&mut self, values: &EditValues) -> OutlineResult<()> {
        let Some(path) = self.selected.clone() else {
            return Ok(());
        };
        self.document = mutation::edit(&self.document, &path, values)?;
        Ok(())
    }

    /// Add a default node of `kind`, targeting the selected node's children
    /// (the selected folder is marked expanded) or the root sequence when
    /// nothing is selected.
    pub fn add(&mut self, kind: NodeKind) -> OutlineResult<()> {
        let target = self.selected.clone();
        self.document = mutation::add(&self.document, target.as_ref(), kind)?;
        if let Some(path) = target {
            self.expanded.insert(path);
        }
        Ok(())
    }

    /// Delete the node at `path` and its subtree. The selection is cleared
    /// when it equals the deleted path or points anywhere below it.
    pub fn delete(&mut self, path: &NodePath) -> OutlineResult<()> {
        self.document = mutation::delete(&self.document, path)?;
        if let Some(selected) = &self.selected {
            if selected == path || selected.is_descendant_of(path) {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// Delete the selected node; without a selection this is a no-op.
    pub fn delete_selected(&mut self) -> OutlineResult<()> {
        let Some(path) = self.selected.clone() else {
            return Ok(());
        };
        self.delete(&path)
    }

    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.contains(path)
    }

    pub fn toggle_expanded(&mut self, path: &NodePath) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.clone());
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Start a drag session from the node at `path`.
    pub fn begin_drag(&mut self, path: &NodePath) -> OutlineResult<()> {
        mutation::select(&self.document, path)?;
        self.dragging = Some(path.clone());
        Ok(())
    }

    /// Hovering a folder during a drag expands it, whether or not the drop
    /// lands; the expansion is not rolled back on cancel. Hovering anything
    /// else does nothing, as does a stale path.
    pub fn drag_over(&mut self, path: &NodePath) {
        if let Ok(node) = self.document.resolve(path) {
            if node.is_folder() {
                self.expanded.insert(path.clone());
            }
        }
    }

    /// Complete the drag session with a drop at `dest`. The drag state is
    /// reset whether or not the move succeeds; a selection tracking the
    /// dragged node follows it to its new path.
    pub fn drop_on(&mut self, dest: &NodePath) -> OutlineResult<()> {
        let Some(source) = self.dragging.take() else {
            debug!("drop without an active drag ignored");
            return Ok(());
        };

        let outcome = reorder::move_node(&self.document, &source, dest)?;
        self.document = outcome.document;
        if let Some(folder) = outcome.expanded_folder {
            self.expanded.insert(folder);
        }
        if self.selected.as_ref() == Some(&source) {
            self.selected = Some(outcome.new_path);
        }
        Ok(())
    }

    /// End the drag session without a drop.
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Resolve and return the selected node, if the selection still resolves.
    pub fn selected_node(&self) -> Option<&OutlineNode> {
        let path = self.selected.as_ref()?;
        self.document.resolve(path).ok()
    }
}
