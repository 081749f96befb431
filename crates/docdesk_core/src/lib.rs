//! Core domain logic for DocDesk.
//! This crate is the single source of truth for document collection
//! invariants: the store, its derived views, and the bulk-action flow.

pub mod clock;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod repo;
pub mod seed;
pub mod service;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::document::{
    validate_title, DocumentContent, DocumentId, DocumentPatch, DocumentRecord,
    DocumentValidationError,
};
pub use navigation::{EditorLocation, Navigator, RecordingNavigator};
pub use repo::document_repo::{
    DocumentRepository, InMemoryDocumentRepository, RepoError, RepoResult,
};
pub use seed::sample_documents;
pub use service::bulk_action::{can_create, BulkActionController, DeleteFlow};
pub use service::document_list::{
    total_label, DocumentListSession, DocumentRow, SessionConfig, ToolbarMode,
};
pub use service::document_store::{
    DocumentStore, StoreError, StoreEvent, StoreResult, SubscriptionId,
};
pub use view::projection::{project, ProjectionCache, SortKey, ViewQuery};
pub use view::selection::{SelectionStatus, SelectionTracker};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
