//! Canonical document store.
//!
//! # Responsibility
//! - Own the document collection for one session and expose
//!   create/update/delete/list use-cases over a `DocumentRepository`.
//! - Stamp timestamps from an injected `Clock`.
//! - Notify subscribers after every applied mutation so dependent views can
//!   re-derive.
//!
//! # Invariants
//! - `revision` increments exactly once per applied mutation; failed and
//!   no-op calls leave it unchanged and emit nothing.
//! - Listeners run after the mutation is fully applied, in subscription
//!   order.
//! - A failed call never leaves a partial mutation behind.

use crate::clock::{Clock, SystemClock};
use crate::model::document::{
    DocumentContent, DocumentId, DocumentPatch, DocumentRecord, DocumentValidationError,
};
use crate::repo::document_repo::{DocumentRepository, InMemoryDocumentRepository, RepoError};
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for document use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Title is empty or whitespace-only.
    InvalidTitle,
    /// Target document does not exist.
    NotFound(DocumentId),
    /// Inserted record collides with an existing id.
    DuplicateId(DocumentId),
    /// Any other repository failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "document title must not be blank"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::DuplicateId(id) => write!(f, "document id already exists: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            RepoError::Validation(DocumentValidationError::InvalidTitle) => Self::InvalidTitle,
            other => Self::Repo(other),
        }
    }
}

impl From<DocumentValidationError> for StoreError {
    fn from(value: DocumentValidationError) -> Self {
        RepoError::from(value).into()
    }
}

/// Change notification delivered to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created { id: DocumentId, revision: u64 },
    Updated { id: DocumentId, revision: u64 },
    Deleted { ids: Vec<DocumentId>, revision: u64 },
}

impl StoreEvent {
    /// Store revision right after the mutation was applied.
    pub fn revision(&self) -> u64 {
        match self {
            Self::Created { revision, .. }
            | Self::Updated { revision, .. }
            | Self::Deleted { revision, .. } => *revision,
        }
    }
}

/// Handle returned by `DocumentStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent) + Send>;

/// Owned document store with change notification.
pub struct DocumentStore<R = InMemoryDocumentRepository, C = SystemClock> {
    repo: R,
    clock: C,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl DocumentStore {
    /// Creates an empty process-memory store on wall-clock time.
    pub fn in_memory() -> Self {
        Self::new(InMemoryDocumentRepository::new(), SystemClock)
    }
}

impl<R: DocumentRepository, C: Clock> DocumentStore<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Monotonic change counter, bumped once per applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns an owned snapshot in insertion order.
    pub fn list(&self) -> StoreResult<Vec<DocumentRecord>> {
        Ok(self.repo.list_documents()?)
    }

    pub fn get(&self, id: DocumentId) -> StoreResult<Option<DocumentRecord>> {
        Ok(self.repo.get_document(id)?)
    }

    /// Ids of every stored document, in insertion order.
    pub fn ids(&self) -> StoreResult<Vec<DocumentId>> {
        Ok(self.repo.document_ids()?)
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.repo.count_documents()?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Creates a document with empty content.
    ///
    /// # Errors
    /// - `InvalidTitle` when `title` is blank after trimming.
    pub fn create(&mut self, title: &str) -> StoreResult<DocumentRecord> {
        self.create_with(title, DocumentContent::new())
    }

    /// Creates a document with an initial content blob.
    pub fn create_with(
        &mut self,
        title: &str,
        content: impl Into<DocumentContent>,
    ) -> StoreResult<DocumentRecord> {
        let mut record = DocumentRecord::new(title, self.clock.now())?;
        record.content = content.into();
        self.insert(record)
    }

    /// Inserts an externally built record (seed and import paths).
    pub fn insert(&mut self, record: DocumentRecord) -> StoreResult<DocumentRecord> {
        let id = self.repo.insert_document(&record)?;
        let revision = self.bump();
        debug!("event=document_create module=store status=ok id={id} revision={revision}");
        self.emit(StoreEvent::Created { id, revision });
        Ok(record)
    }

    /// Applies `patch` to one document and refreshes `updated_at`.
    ///
    /// An empty patch returns the stored record untouched and emits nothing.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `InvalidTitle` when the patch carries a blank title.
    pub fn update(&mut self, id: DocumentId, patch: &DocumentPatch) -> StoreResult<DocumentRecord> {
        let mut record = self.repo.get_document(id)?.ok_or(StoreError::NotFound(id))?;
        if patch.is_empty() {
            return Ok(record);
        }
        record.apply(patch, self.clock.now())?;
        self.repo.replace_document(&record)?;

        let revision = self.bump();
        debug!("event=document_update module=store status=ok id={id} revision={revision}");
        self.emit(StoreEvent::Updated { id, revision });
        Ok(record)
    }

    /// Removes every document whose id is in `ids`.
    ///
    /// Absent ids are ignored, so repeating the call is a no-op. Returns the
    /// number of documents removed.
    pub fn delete_many(&mut self, ids: &BTreeSet<DocumentId>) -> StoreResult<usize> {
        let removed = self.repo.delete_documents(ids)?;
        if removed.is_empty() {
            return Ok(0);
        }

        let count = removed.len();
        let revision = self.bump();
        debug!(
            "event=document_delete module=store status=ok requested={} removed={count} revision={revision}",
            ids.len()
        );
        self.emit(StoreEvent::Deleted {
            ids: removed,
            revision,
        });
        Ok(count)
    }

    /// Registers a listener invoked after every applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
