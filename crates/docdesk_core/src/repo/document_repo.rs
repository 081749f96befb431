//! Document repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical document collection.
//! - Keep storage details behind a trait so a durable backend can replace
//!   the in-memory one without touching views or controllers.
//!
//! # Invariants
//! - Write paths must call `DocumentRecord::validate()` before mutating.
//! - `list_documents` returns insertion order.
//! - Ids are unique across the collection.

use crate::model::document::{DocumentId, DocumentRecord, DocumentValidationError};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for document persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(DocumentValidationError),
    NotFound(DocumentId),
    DuplicateId(DocumentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::DuplicateId(id) => write!(f, "document id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<DocumentValidationError> for RepoError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for document CRUD operations.
pub trait DocumentRepository {
    fn insert_document(&mut self, record: &DocumentRecord) -> RepoResult<DocumentId>;
    fn replace_document(&mut self, record: &DocumentRecord) -> RepoResult<()>;
    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>>;
    fn list_documents(&self) -> RepoResult<Vec<DocumentRecord>>;
    /// Ids in insertion order, without loading records.
    fn document_ids(&self) -> RepoResult<Vec<DocumentId>>;
    fn count_documents(&self) -> RepoResult<usize>;
    /// Removes every matching document and returns the ids actually removed,
    /// in insertion order. Absent ids are ignored.
    fn delete_documents(&mut self, ids: &BTreeSet<DocumentId>) -> RepoResult<Vec<DocumentId>>;
}

/// Process-memory document repository.
///
/// Records are kept in a `Vec` for insertion order plus an id index for
/// O(1) lookups.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    records: Vec<DocumentRecord>,
    index: HashMap<DocumentId, usize>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id, position))
            .collect();
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn insert_document(&mut self, record: &DocumentRecord) -> RepoResult<DocumentId> {
        record.validate()?;
        if self.index.contains_key(&record.id) {
            return Err(RepoError::DuplicateId(record.id));
        }

        self.index.insert(record.id, self.records.len());
        self.records.push(record.clone());
        Ok(record.id)
    }

    fn replace_document(&mut self, record: &DocumentRecord) -> RepoResult<()> {
        record.validate()?;
        let position = *self
            .index
            .get(&record.id)
            .ok_or(RepoError::NotFound(record.id))?;
        self.records[position] = record.clone();
        Ok(())
    }

    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>> {
        Ok(self
            .index
            .get(&id)
            .map(|position| self.records[*position].clone()))
    }

    fn list_documents(&self) -> RepoResult<Vec<DocumentRecord>> {
        Ok(self.records.clone())
    }

    fn document_ids(&self) -> RepoResult<Vec<DocumentId>> {
        Ok(self.records.iter().map(|record| record.id).collect())
    }

    fn count_documents(&self) -> RepoResult<usize> {
        Ok(self.records.len())
    }

    fn delete_documents(&mut self, ids: &BTreeSet<DocumentId>) -> RepoResult<Vec<DocumentId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::new();
        self.records.retain(|record| {
            if ids.contains(&record.id) {
                removed.push(record.id);
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            self.reindex();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentRepository, InMemoryDocumentRepository, RepoError};
    use crate::model::document::DocumentRecord;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    #[test]
    fn insert_rejects_duplicate_id() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut repo = InMemoryDocumentRepository::new();
        let record = DocumentRecord::new("One", now).unwrap();

        repo.insert_document(&record).unwrap();
        let err = repo.insert_document(&record).unwrap_err();

        assert_eq!(err, RepoError::DuplicateId(record.id));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn delete_keeps_index_consistent_for_survivors() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut repo = InMemoryDocumentRepository::new();
        let first = DocumentRecord::new("First", now).unwrap();
        let second = DocumentRecord::new("Second", now).unwrap();
        let third = DocumentRecord::new("Third", now).unwrap();
        for record in [&first, &second, &third] {
            repo.insert_document(record).unwrap();
        }

        let removed = repo
            .delete_documents(&BTreeSet::from([first.id]))
            .unwrap();
        assert_eq!(removed, vec![first.id]);

        let loaded = repo.get_document(third.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Third");
        assert!(repo.get_document(first.id).unwrap().is_none());
        assert_eq!(repo.document_ids().unwrap(), vec![second.id, third.id]);
        assert_eq!(repo.count_documents().unwrap(), 2);
    }
}
