//! Editor navigation hand-off.
//!
//! # Responsibility
//! - Describe where a freshly created document should be opened.
//! - Let the UI shell decide how to actually open it.
//!
//! `title` and `updated_at` travel as display-only query parameters; they are
//! never parsed back into the store.

use crate::model::document::{DocumentId, DocumentRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Destination of the per-document editor page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorLocation {
    pub id: DocumentId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

impl EditorLocation {
    pub fn for_record(record: &DocumentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            updated_at: record.updated_at,
        }
    }

    /// Renders `/{id}?documentName={title}&lastUpdate={rfc3339}`.
    pub fn href(&self) -> String {
        format!(
            "/{}?documentName={}&lastUpdate={}",
            self.id,
            encode_query_value(&self.title),
            encode_query_value(&self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true))
        )
    }
}

/// Opens the editor for a document. Implemented by the UI shell.
pub trait Navigator {
    fn open_editor(&mut self, location: &EditorLocation);
}

/// Navigator that keeps every requested location, newest last.
///
/// Used by shells that poll for pending navigation instead of receiving a
/// callback.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    opened: Vec<EditorLocation>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> &[EditorLocation] {
        &self.opened
    }

    pub fn last(&self) -> Option<&EditorLocation> {
        self.opened.last()
    }

    /// Removes and returns all recorded locations.
    pub fn drain(&mut self) -> Vec<EditorLocation> {
        std::mem::take(&mut self.opened)
    }
}

impl Navigator for RecordingNavigator {
    fn open_editor(&mut self, location: &EditorLocation) {
        self.opened.push(location.clone());
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn open_editor(&mut self, location: &EditorLocation) {
        (**self).open_editor(location);
    }
}

// RFC 3986 unreserved characters pass through; everything else is
// percent-encoded byte by byte.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte));
            }
            other => {
                let _ = write!(encoded, "%{other:02X}");
            }
        }
    }
    encoded
}
