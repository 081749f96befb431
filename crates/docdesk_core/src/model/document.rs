//! Document domain model.
//!
//! # Responsibility
//! - Define the canonical record listed on the landing page and opened in
//!   the editor.
//! - Own title and record-level validation.
//!
//! # Invariants
//! - `id` is stable, never nil, and never reused for another document.
//! - `title` is non-empty after trimming and is stored as typed.
//! - `updated_at` is never earlier than `created_at`, and moves only when a
//!   patch carries a title or content.
//! - `content` is opaque to core; it is passed through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one document.
pub type DocumentId = Uuid;

/// Opaque editor payload.
///
/// The rich-text editor owns the internal representation; core only stores
/// and returns the serialized blob.
pub type DocumentContent = String;

/// Validation errors for document records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    /// Title is empty or whitespace-only.
    InvalidTitle,
    /// Identifier is the nil UUID.
    NilId,
    /// `updated_at` precedes `created_at`.
    InvalidTimestamps {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "document title must not be blank"),
            Self::NilId => write!(f, "document id must not be nil"),
            Self::InvalidTimestamps {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({}) must be >= created_at ({})",
                updated_at.to_rfc3339(),
                created_at.to_rfc3339()
            ),
        }
    }
}

impl Error for DocumentValidationError {}

/// One document's metadata plus its opaque content payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub content: DocumentContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Creates a fresh record with a generated id and empty content.
    ///
    /// # Errors
    /// - `InvalidTitle` when `title` is blank after trimming.
    pub fn new(title: &str, now: DateTime<Utc>) -> Result<Self, DocumentValidationError> {
        Self::with_id(Uuid::new_v4(), title, DocumentContent::new(), now)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by seed/import paths where identity already exists.
    pub fn with_id(
        id: DocumentId,
        title: &str,
        content: impl Into<DocumentContent>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DocumentValidationError> {
        let record = Self {
            id,
            title: validate_title(title)?,
            content: content.into(),
            created_at,
            updated_at: created_at,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.id.is_nil() {
            return Err(DocumentValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(DocumentValidationError::InvalidTitle);
        }
        if self.updated_at < self.created_at {
            return Err(DocumentValidationError::InvalidTimestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Applies a patch and refreshes `updated_at`.
    ///
    /// The record is left untouched when the patch is invalid. A clock that
    /// runs behind `created_at` is clamped so the timestamp invariant holds.
    pub fn apply(
        &mut self,
        patch: &DocumentPatch,
        now: DateTime<Utc>,
    ) -> Result<(), DocumentValidationError> {
        let title = match patch.title.as_deref() {
            Some(title) => Some(validate_title(title)?),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = patch.content.as_ref() {
            self.content = content.clone();
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }
}

/// Partial update for one document.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<DocumentContent>,
}

impl DocumentPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<DocumentContent>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Accepts a user-provided title as typed, rejecting blank input.
pub fn validate_title(title: &str) -> Result<String, DocumentValidationError> {
    if title.trim().is_empty() {
        return Err(DocumentValidationError::InvalidTitle);
    }
    Ok(title.to_string())
}
