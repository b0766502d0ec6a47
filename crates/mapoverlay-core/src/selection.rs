//! Single-shape selection for highlighting and detail display.

use crate::shapes::{Shape, ShapeId};
use crate::store::ShapeStore;

/// Tracks which shape, coverage area or zone is active.
///
/// Selecting is unconditional and never toggles; a selected ID that no longer
/// exists in the store resolves as no selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRegistry {
    selected: Option<ShapeId>,
}

impl SelectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a shape. Re-selecting the current ID keeps it selected.
    pub fn select(&mut self, id: ShapeId) {
        if self.selected == Some(id) {
            log::trace!("Re-selected {}", id);
        } else {
            log::debug!("Selected {}", id);
        }
        self.selected = Some(id);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The raw selected ID, which may be stale.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Whether `id` is the current selection.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected == Some(id)
    }

    /// Look up the selected shape in `store`.
    pub fn resolve<'a>(&self, store: &'a ShapeStore) -> Option<&'a Shape> {
        let id = self.selected?;
        let shape = store.get(id);
        if shape.is_none() {
            log::debug!("Selection {} is stale", id);
        }
        shape
    }
}
