//! Search/sort projection of the document collection.
//!
//! # Responsibility
//! - Derive the ordered rows shown on the landing page from a store
//!   snapshot plus the current search text and sort choice.
//!
//! # Invariants
//! - Projection is a pure function of `(records, query)`; it never mutates
//!   the store.
//! - Sorting is stable: ties keep insertion order.
//! - `SortKey::UpdatedAt` ("Last modification") orders by `created_at`,
//!   identical to the default order. `updated_at` is not consulted.

use crate::model::document::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Sort choice offered by the landing page picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// "Document name": ascending by title.
    Title,
    /// "Last modification": newest `created_at` first.
    UpdatedAt,
    /// Picker placeholder: newest `created_at` first.
    #[default]
    None,
}

impl SortKey {
    /// Maps a picker option value to a sort key.
    ///
    /// `"title"` and `"updatedAt"` select their keys; the empty placeholder
    /// and any unknown value fall back to `SortKey::None`.
    pub fn from_option_value(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "updatedAt" => Self::UpdatedAt,
            _ => Self::None,
        }
    }

    pub fn option_value(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::UpdatedAt => "updatedAt",
            Self::None => "",
        }
    }
}

/// Current search text and sort choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ViewQuery {
    pub search_text: String,
    pub sort_key: SortKey,
}

impl ViewQuery {
    pub fn new(search_text: impl Into<String>, sort_key: SortKey) -> Self {
        Self {
            search_text: search_text.into(),
            sort_key,
        }
    }

    /// Returns whether `record` passes the search filter.
    ///
    /// Empty search matches everything; otherwise the title must contain the
    /// search text, ignoring case.
    pub fn matches(&self, record: &DocumentRecord) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        record
            .title
            .to_lowercase()
            .contains(&self.search_text.to_lowercase())
    }
}

/// Filters then sorts `records` for display.
pub fn project(records: &[DocumentRecord], query: &ViewQuery) -> Vec<DocumentRecord> {
    let mut rows: Vec<DocumentRecord> = records
        .iter()
        .filter(|record| query.matches(record))
        .cloned()
        .collect();

    match query.sort_key {
        SortKey::Title => rows.sort_by(|left, right| left.title.cmp(&right.title)),
        SortKey::UpdatedAt | SortKey::None => rows.sort_by_key(|record| Reverse(record.created_at)),
    }

    rows
}

/// Memoized projection keyed by `(store revision, query)`.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entry: Option<CachedProjection>,
    computations: u64,
}

#[derive(Debug)]
struct CachedProjection {
    revision: u64,
    query: ViewQuery,
    rows: Vec<DocumentRecord>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached rows when `revision` and `query` match the last call,
    /// otherwise loads a snapshot and recomputes.
    pub fn get_or_project<E, F>(
        &mut self,
        revision: u64,
        query: &ViewQuery,
        load: F,
    ) -> Result<&[DocumentRecord], E>
    where
        F: FnOnce() -> Result<Vec<DocumentRecord>, E>,
    {
        let fresh = matches!(
            &self.entry,
            Some(entry) if entry.revision == revision && entry.query == *query
        );

        if !fresh {
            let records = load()?;
            self.computations += 1;
            self.entry = Some(CachedProjection {
                revision,
                query: query.clone(),
                rows: project(&records, query),
            });
        }

        Ok(self
            .entry
            .as_ref()
            .map(|entry| entry.rows.as_slice())
            .unwrap_or(&[]))
    }

    /// Drops the cached rows.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of recomputations performed so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
