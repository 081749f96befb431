//! Bulk-action controller.
//!
//! # Responsibility
//! - Run the confirm-then-delete flow over the current selection.
//! - Create documents and hand them off to the editor navigator.
//! - Keep the selection a subset of the store on every delete path.
//!
//! # Invariants
//! - `request_delete` with an empty selection is a no-op.
//! - `cancel` never touches the store.
//! - `confirm` deletes, then clears the selection, then returns to `Idle`.
//!   If the delete fails, neither the selection nor the flow changes.
//! - The flow drops back to `Idle` whenever the selection becomes empty.
//! - A blank title never reaches the store.

use crate::clock::{Clock, SystemClock};
use crate::model::document::{DocumentId, DocumentPatch, DocumentRecord};
use crate::navigation::{EditorLocation, Navigator, RecordingNavigator};
use crate::repo::document_repo::{DocumentRepository, InMemoryDocumentRepository};
use crate::service::document_store::{DocumentStore, StoreError, StoreResult};
use crate::view::selection::SelectionTracker;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeSet;

/// Delete confirmation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteFlow {
    #[default]
    Idle,
    ConfirmPending,
}

/// Whether the create action is enabled for `title`.
pub fn can_create(title: &str) -> bool {
    !title.trim().is_empty()
}

/// Coordinates store mutations with the selection set.
pub struct BulkActionController<
    R = InMemoryDocumentRepository,
    C = SystemClock,
    N = RecordingNavigator,
> {
    store: DocumentStore<R, C>,
    selection: SelectionTracker,
    navigator: N,
    flow: DeleteFlow,
}

impl<R: DocumentRepository, C: Clock, N: Navigator> BulkActionController<R, C, N> {
    pub fn new(store: DocumentStore<R, C>, navigator: N) -> Self {
        Self {
            store,
            selection: SelectionTracker::new(),
            navigator,
            flow: DeleteFlow::Idle,
        }
    }

    pub fn store(&self) -> &DocumentStore<R, C> {
        &self.store
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn flow(&self) -> DeleteFlow {
        self.flow
    }

    /// Checks or unchecks one document.
    ///
    /// # Errors
    /// - `NotFound` when checking an id the store does not hold.
    pub fn toggle(&mut self, id: DocumentId, checked: bool) -> StoreResult<()> {
        if checked && self.store.get(id)?.is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.selection.toggle(id, checked);
        self.reset_flow_if_unselected();
        Ok(())
    }

    /// Checks or unchecks every visible document.
    ///
    /// Ids no longer in the store are skipped when checking.
    pub fn toggle_all(&mut self, checked: bool, visible_ids: &[DocumentId]) -> StoreResult<()> {
        if checked {
            let existing: BTreeSet<DocumentId> = self.store.ids()?.into_iter().collect();
            self.selection.toggle_all(
                true,
                visible_ids.iter().filter(|id| existing.contains(*id)),
            );
        } else {
            self.selection.toggle_all(false, visible_ids);
        }
        self.reset_flow_if_unselected();
        Ok(())
    }

    /// `Idle -> ConfirmPending` when something is selected.
    pub fn request_delete(&mut self) -> DeleteFlow {
        if self.flow == DeleteFlow::Idle && !self.selection.is_empty() {
            self.flow = DeleteFlow::ConfirmPending;
            debug!(
                "event=delete_requested module=bulk_action status=ok selected={}",
                self.selection.len()
            );
        }
        self.flow
    }

    /// `ConfirmPending -> Idle` without touching the store.
    pub fn cancel(&mut self) -> DeleteFlow {
        if self.flow == DeleteFlow::ConfirmPending {
            debug!("event=delete_cancelled module=bulk_action status=ok");
        }
        self.flow = DeleteFlow::Idle;
        self.flow
    }

    /// Deletes the selected documents and clears the selection.
    ///
    /// Returns the number of documents removed; `0` when no confirmation
    /// was pending.
    pub fn confirm(&mut self) -> StoreResult<usize> {
        if self.flow != DeleteFlow::ConfirmPending {
            return Ok(0);
        }

        let removed = self.store.delete_many(self.selection.selected_ids())?;
        self.selection.clear();
        self.flow = DeleteFlow::Idle;
        info!("event=delete_confirmed module=bulk_action status=ok removed={removed}");
        Ok(removed)
    }

    /// Creates a document and opens it in the editor.
    ///
    /// A blank title is a silent no-op and returns `Ok(None)`.
    pub fn create(&mut self, title: &str) -> StoreResult<Option<DocumentRecord>> {
        if !can_create(title) {
            debug!("event=document_create module=bulk_action status=skipped reason=blank_title");
            return Ok(None);
        }

        let record = self.store.create(title)?;
        self.navigator.open_editor(&EditorLocation::for_record(&record));
        info!(
            "event=document_create module=bulk_action status=ok id={}",
            record.id
        );
        Ok(Some(record))
    }

    /// Applies an editor or rename patch to one document.
    pub fn update(&mut self, id: DocumentId, patch: &DocumentPatch) -> StoreResult<DocumentRecord> {
        self.store.update(id, patch)
    }

    /// Deletes `ids` outside the confirmation flow, pruning the selection.
    pub fn delete(&mut self, ids: &BTreeSet<DocumentId>) -> StoreResult<usize> {
        let removed = self.store.delete_many(ids)?;
        self.selection.prune(ids);
        self.reset_flow_if_unselected();
        Ok(removed)
    }

    /// Inserts a prebuilt record (seed and import paths).
    pub fn insert(&mut self, record: DocumentRecord) -> StoreResult<DocumentRecord> {
        self.store.insert(record)
    }

    fn reset_flow_if_unselected(&mut self) {
        if self.selection.is_empty() {
            self.flow = DeleteFlow::Idle;
        }
    }
}
