//! Checkbox selection state for bulk actions.
//!
//! # Invariants
//! - The selected set only ever holds ids that exist in the store; callers
//!   prune it on every store delete.
//! - `toggle_all` touches the visible ids only, never the full collection.

use crate::model::document::DocumentId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Header checkbox state derived from the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStatus {
    pub all_checked: bool,
    pub indeterminate: bool,
}

/// Set of document ids currently checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<DocumentId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: DocumentId, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Checks or unchecks every id in `visible_ids`.
    pub fn toggle_all<'a, I>(&mut self, checked: bool, visible_ids: I)
    where
        I: IntoIterator<Item = &'a DocumentId>,
    {
        for id in visible_ids {
            self.toggle(*id, checked);
        }
    }

    pub fn status<'a, I>(&self, all_ids: I) -> SelectionStatus
    where
        I: IntoIterator<Item = &'a DocumentId>,
    {
        let mut total = 0usize;
        let mut checked = 0usize;
        for id in all_ids {
            total += 1;
            if self.selected.contains(id) {
                checked += 1;
            }
        }

        SelectionStatus {
            all_checked: total > 0 && checked == total,
            indeterminate: checked > 0 && checked < total,
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: DocumentId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_ids(&self) -> &BTreeSet<DocumentId> {
        &self.selected
    }

    /// Drops ids that were removed from the store.
    pub fn prune<'a, I>(&mut self, removed_ids: I)
    where
        I: IntoIterator<Item = &'a DocumentId>,
    {
        for id in removed_ids {
            self.selected.remove(id);
        }
    }

    /// Keeps only ids present in `existing_ids`.
    pub fn retain_existing(&mut self, existing_ids: &BTreeSet<DocumentId>) {
        self.selected.retain(|id| existing_ids.contains(id));
    }
}
