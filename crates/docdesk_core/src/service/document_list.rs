//! Landing-page session.
//!
//! # Responsibility
//! - Wire store, projection, selection and bulk actions into one view model
//!   driven by synchronous UI commands.
//! - Expose the rows, header checkbox, toolbar mode and totals the landing
//!   page renders.
//!
//! # Invariants
//! - Every read observes all mutations dispatched before it.
//! - The header checkbox and "select all" operate on visible rows only.
//! - The toolbar shows the delete affordance iff something is selected.

use crate::clock::{Clock, SystemClock};
use crate::model::document::{DocumentId, DocumentPatch, DocumentRecord};
use crate::navigation::{Navigator, RecordingNavigator};
use crate::repo::document_repo::{DocumentRepository, InMemoryDocumentRepository};
use crate::seed::sample_documents;
use crate::service::bulk_action::{BulkActionController, DeleteFlow};
use crate::service::document_store::{DocumentStore, StoreResult};
use crate::view::projection::{ProjectionCache, SortKey, ViewQuery};
use crate::view::selection::SelectionStatus;
use log::info;
use serde::Serialize;

/// Session start-up options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Load the sample documents into the empty store.
    pub seed_sample_documents: bool,
    /// Sort choice active before the user picks one.
    pub initial_sort: SortKey,
}

/// Which control occupies the header's right-hand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarMode {
    /// "Delete files" button with confirmation.
    DeleteSelected,
    /// "Order by" picker.
    SortPicker,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub checked: bool,
}

/// View model for the document list page.
pub struct DocumentListSession<
    R = InMemoryDocumentRepository,
    C = SystemClock,
    N = RecordingNavigator,
> {
    controller: BulkActionController<R, C, N>,
    query: ViewQuery,
    cache: ProjectionCache,
}

impl DocumentListSession {
    /// Creates a process-memory session on wall-clock time.
    pub fn in_memory(config: &SessionConfig) -> StoreResult<Self> {
        Self::new(
            BulkActionController::new(DocumentStore::in_memory(), RecordingNavigator::new()),
            config,
        )
    }

    /// Creates an unseeded process-memory session. Infallible.
    pub fn empty() -> Self {
        Self::from_controller(
            BulkActionController::new(DocumentStore::in_memory(), RecordingNavigator::new()),
            SortKey::None,
        )
    }
}

impl<R: DocumentRepository, C: Clock, N: Navigator> DocumentListSession<R, C, N> {
    pub fn new(
        mut controller: BulkActionController<R, C, N>,
        config: &SessionConfig,
    ) -> StoreResult<Self> {
        if config.seed_sample_documents {
            let samples = sample_documents()?;
            let count = samples.len();
            for record in samples {
                controller.insert(record)?;
            }
            info!("event=session_seed module=document_list status=ok count={count}");
        }

        Ok(Self::from_controller(controller, config.initial_sort))
    }

    fn from_controller(controller: BulkActionController<R, C, N>, sort_key: SortKey) -> Self {
        Self {
            controller,
            query: ViewQuery::new("", sort_key),
            cache: ProjectionCache::new(),
        }
    }

    pub fn controller(&self) -> &BulkActionController<R, C, N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut BulkActionController<R, C, N> {
        &mut self.controller
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
    }

    /// Projected documents for the current query.
    pub fn visible(&mut self) -> StoreResult<Vec<DocumentRecord>> {
        let store = self.controller.store();
        let revision = store.revision();
        let rows = self
            .cache
            .get_or_project(revision, &self.query, || store.list())?;
        Ok(rows.to_vec())
    }

    pub fn visible_ids(&mut self) -> StoreResult<Vec<DocumentId>> {
        Ok(self.visible()?.into_iter().map(|record| record.id).collect())
    }

    /// Projected rows with their checkbox state.
    pub fn rows(&mut self) -> StoreResult<Vec<DocumentRow>> {
        let visible = self.visible()?;
        let selection = self.controller.selection();
        Ok(visible
            .into_iter()
            .map(|record| DocumentRow {
                checked: selection.is_selected(record.id),
                record,
            })
            .collect())
    }

    /// Header checkbox state over the visible rows.
    pub fn header_checkbox(&mut self) -> StoreResult<SelectionStatus> {
        let ids = self.visible_ids()?;
        Ok(self.controller.selection().status(&ids))
    }

    pub fn toolbar(&self) -> ToolbarMode {
        if self.controller.selection().is_empty() {
            ToolbarMode::SortPicker
        } else {
            ToolbarMode::DeleteSelected
        }
    }

    /// Count caption over the whole collection, e.g. `Total 2 documents`.
    pub fn total_label(&self) -> StoreResult<String> {
        Ok(total_label(self.controller.store().len()?))
    }

    pub fn delete_flow(&self) -> DeleteFlow {
        self.controller.flow()
    }

    pub fn toggle(&mut self, id: DocumentId, checked: bool) -> StoreResult<()> {
        self.controller.toggle(id, checked)
    }

    /// Checks or unchecks every visible row.
    pub fn toggle_all(&mut self, checked: bool) -> StoreResult<()> {
        let ids = self.visible_ids()?;
        self.controller.toggle_all(checked, &ids)
    }

    pub fn request_delete(&mut self) -> DeleteFlow {
        self.controller.request_delete()
    }

    pub fn cancel_delete(&mut self) -> DeleteFlow {
        self.controller.cancel()
    }

    pub fn confirm_delete(&mut self) -> StoreResult<usize> {
        self.controller.confirm()
    }

    pub fn create_document(&mut self, title: &str) -> StoreResult<Option<DocumentRecord>> {
        self.controller.create(title)
    }

    pub fn update_document(
        &mut self,
        id: DocumentId,
        patch: &DocumentPatch,
    ) -> StoreResult<DocumentRecord> {
        self.controller.update(id, patch)
    }

    /// Number of projection recomputations, for cache diagnostics.
    pub fn projection_computations(&self) -> u64 {
        self.cache.computations()
    }
}

/// Formats the collection count caption. Only counts above one are plural.
pub fn total_label(count: usize) -> String {
    let suffix = if count > 1 { "s" } else { "" };
    format!("Total {count} document{suffix}")
}

#[cfg(test)]
mod tests {
    use super::total_label;

    #[test]
    fn total_label_pluralizes_above_one() {
        assert_eq!(total_label(0), "Total 0 document");
        assert_eq!(total_label(1), "Total 1 document");
        assert_eq!(total_label(2), "Total 2 documents");
    }
}
