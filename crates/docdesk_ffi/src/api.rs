//! FFI use-case API for the landing-page shell.
//!
//! # Responsibility
//! - Expose the document list view model as sync, use-case-level calls.
//! - Flatten core types into string/struct envelopes the shell can render.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All calls go through one process-wide session guarded by a mutex, so
//!   commands apply in call order.
//! - Ids cross the boundary as hyphenated UUID strings.

use docdesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DeleteFlow, DocumentId, DocumentListSession, DocumentPatch, DocumentRow, SessionConfig,
    SortKey, ToolbarMode,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

static SESSION: OnceLock<Mutex<DocumentListSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One landing-page row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListItem {
    pub id: String,
    pub title: String,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 last-modification time, shown in the "Last modification"
    /// column.
    pub updated_at: String,
    pub checked: bool,
}

/// Full render state of the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListResponse {
    pub items: Vec<DocumentListItem>,
    pub header_all_checked: bool,
    pub header_indeterminate: bool,
    /// `delete_selected` or `sort_picker`.
    pub toolbar: String,
    /// `idle` or `confirm_pending`.
    pub delete_flow: String,
    pub total_label: String,
    pub search_text: String,
    /// Picker option value: `title`, `updatedAt` or empty.
    pub sort_key: String,
    /// Empty on success, diagnostics otherwise.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentActionResponse {
    pub ok: bool,
    /// Created or updated document id.
    pub document_id: Option<String>,
    /// Editor location to open after create.
    pub href: Option<String>,
    /// Documents removed by a delete.
    pub deleted: u32,
    pub message: String,
}

impl DocumentActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            document_id: None,
            href: None,
            deleted: 0,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            document_id: None,
            href: None,
            deleted: 0,
            message: message.into(),
        }
    }
}

/// Replaces the session with a fresh one.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_reset(seed_samples: bool) -> DocumentActionResponse {
    let config = SessionConfig {
        seed_sample_documents: seed_samples,
        initial_sort: SortKey::None,
    };
    match DocumentListSession::in_memory(&config) {
        Ok(fresh) => {
            *lock_session() = fresh;
            DocumentActionResponse::success("Session reset.")
        }
        Err(err) => DocumentActionResponse::failure(format!("documents_reset failed: {err}")),
    }
}

/// Returns the current render state.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_list() -> DocumentListResponse {
    list_in(&mut lock_session())
}

/// Sets the live search text and returns the new render state.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_set_search(text: String) -> DocumentListResponse {
    let mut session = lock_session();
    session.set_search_text(text);
    list_in(&mut session)
}

/// Sets the sort from a picker option value (`title`, `updatedAt`, empty).
#[flutter_rust_bridge::frb(sync)]
pub fn documents_set_sort(option_value: String) -> DocumentListResponse {
    let mut session = lock_session();
    session.set_sort_key(SortKey::from_option_value(option_value.as_str()));
    list_in(&mut session)
}

/// Checks or unchecks one row.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_toggle(document_id: String, checked: bool) -> DocumentActionResponse {
    toggle_in(&mut lock_session(), &document_id, checked)
}

/// Checks or unchecks every visible row.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_toggle_all(checked: bool) -> DocumentActionResponse {
    match lock_session().toggle_all(checked) {
        Ok(()) => DocumentActionResponse::success("Selection updated."),
        Err(err) => DocumentActionResponse::failure(format!("documents_toggle_all failed: {err}")),
    }
}

/// Opens the delete confirmation when something is selected.
///
/// Returns the resulting flow label.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_request_delete() -> String {
    flow_label(lock_session().request_delete()).to_string()
}

/// Dismisses the delete confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_cancel_delete() -> String {
    flow_label(lock_session().cancel_delete()).to_string()
}

/// Deletes the selected documents after confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_confirm_delete() -> DocumentActionResponse {
    confirm_delete_in(&mut lock_session())
}

/// Creates a document and returns the editor location to open.
///
/// A blank title is accepted and ignored (`ok = false`, no document).
#[flutter_rust_bridge::frb(sync)]
pub fn documents_create(title: String) -> DocumentActionResponse {
    create_in(&mut lock_session(), &title)
}

/// Replaces a document's opaque editor content.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_update_content(document_id: String, content: String) -> DocumentActionResponse {
    update_content_in(&mut lock_session(), &document_id, content)
}

fn lock_session() -> MutexGuard<'static, DocumentListSession> {
    SESSION
        .get_or_init(|| Mutex::new(DocumentListSession::empty()))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("event=session_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        })
}

fn list_in(session: &mut DocumentListSession) -> DocumentListResponse {
    let search_text = session.query().search_text.clone();
    let sort_key = session.query().sort_key.option_value().to_string();
    let toolbar = toolbar_label(session.toolbar()).to_string();
    let delete_flow = flow_label(session.delete_flow()).to_string();

    let rendered = session.rows().and_then(|rows| {
        let header = session.header_checkbox()?;
        let total_label = session.total_label()?;
        Ok((rows, header, total_label))
    });

    match rendered {
        Ok((rows, header, total_label)) => DocumentListResponse {
            items: rows.into_iter().map(to_list_item).collect(),
            header_all_checked: header.all_checked,
            header_indeterminate: header.indeterminate,
            toolbar,
            delete_flow,
            total_label,
            search_text,
            sort_key,
            message: String::new(),
        },
        Err(err) => DocumentListResponse {
            items: Vec::new(),
            header_all_checked: false,
            header_indeterminate: false,
            toolbar,
            delete_flow,
            total_label: String::new(),
            search_text,
            sort_key,
            message: format!("documents_list failed: {err}"),
        },
    }
}

fn toggle_in(
    session: &mut DocumentListSession,
    document_id: &str,
    checked: bool,
) -> DocumentActionResponse {
    let result = parse_document_id(document_id)
        .and_then(|id| session.toggle(id, checked).map_err(|err| err.to_string()));
    match result {
        Ok(()) => DocumentActionResponse::success("Selection updated."),
        Err(err) => DocumentActionResponse::failure(format!("documents_toggle failed: {err}")),
    }
}

fn confirm_delete_in(session: &mut DocumentListSession) -> DocumentActionResponse {
    match session.confirm_delete() {
        Ok(removed) => DocumentActionResponse {
            deleted: u32::try_from(removed).unwrap_or(u32::MAX),
            ..DocumentActionResponse::success(format!("Deleted {removed} document(s)."))
        },
        Err(err) => {
            DocumentActionResponse::failure(format!("documents_confirm_delete failed: {err}"))
        }
    }
}

fn create_in(session: &mut DocumentListSession, title: &str) -> DocumentActionResponse {
    match session.create_document(title) {
        Ok(Some(record)) => {
            let href = session
                .controller_mut()
                .navigator_mut()
                .drain()
                .pop()
                .map(|location| location.href());
            DocumentActionResponse {
                document_id: Some(record.id.to_string()),
                href,
                ..DocumentActionResponse::success("Document created.")
            }
        }
        Ok(None) => DocumentActionResponse::failure("Document name is required."),
        Err(err) => DocumentActionResponse::failure(format!("documents_create failed: {err}")),
    }
}

fn update_content_in(
    session: &mut DocumentListSession,
    document_id: &str,
    content: String,
) -> DocumentActionResponse {
    let result = parse_document_id(document_id).and_then(|id| {
        session
            .update_document(id, &DocumentPatch::content(content))
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(record) => DocumentActionResponse {
            document_id: Some(record.id.to_string()),
            ..DocumentActionResponse::success("Document saved.")
        },
        Err(err) => {
            DocumentActionResponse::failure(format!("documents_update_content failed: {err}"))
        }
    }
}

fn parse_document_id(raw: &str) -> Result<DocumentId, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid document id `{raw}`: {err}"))
}

fn to_list_item(row: DocumentRow) -> DocumentListItem {
    DocumentListItem {
        id: row.record.id.to_string(),
        title: row.record.title,
        created_at: row.record.created_at.to_rfc3339(),
        updated_at: row.record.updated_at.to_rfc3339(),
        checked: row.checked,
    }
}

fn toolbar_label(mode: ToolbarMode) -> &'static str {
    match mode {
        ToolbarMode::DeleteSelected => "delete_selected",
        ToolbarMode::SortPicker => "sort_picker",
    }
}

fn flow_label(flow: DeleteFlow) -> &'static str {
    match flow {
        DeleteFlow::Idle => "idle",
        DeleteFlow::ConfirmPending => "confirm_pending",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        confirm_delete_in, core_version, create_in, init_logging, list_in, ping, toggle_in,
        update_content_in,
    };
    use docdesk_core::{DocumentListSession, SessionConfig, SortKey};

    fn seeded() -> DocumentListSession {
        DocumentListSession::in_memory(&SessionConfig {
            seed_sample_documents: true,
            initial_sort: SortKey::None,
        })
        .unwrap()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/docdesk-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn list_reports_rows_and_header_state() {
        let mut session = seeded();
        let listed = list_in(&mut session);

        assert!(listed.message.is_empty());
        assert_eq!(listed.items.len(), 2);
        assert_eq!(listed.items[0].title, "Fake Doc 2");
        assert_eq!(listed.toolbar, "sort_picker");
        assert_eq!(listed.delete_flow, "idle");
        assert_eq!(listed.total_label, "Total 2 documents");
        assert!(!listed.header_all_checked);
    }

    #[test]
    fn create_returns_editor_href() {
        let mut session = seeded();

        let created = create_in(&mut session, "Roadmap");
        assert!(created.ok);
        let id = created.document_id.unwrap();
        assert!(created
            .href
            .unwrap()
            .starts_with(&format!("/{id}?documentName=Roadmap&lastUpdate=")));

        let blank = create_in(&mut session, "  ");
        assert!(!blank.ok);
        assert_eq!(list_in(&mut session).items.len(), 3);
    }

    #[test]
    fn toggle_then_confirm_deletes_selected() {
        let mut session = seeded();
        let first_id = list_in(&mut session).items[0].id.clone();

        assert!(toggle_in(&mut session, &first_id, true).ok);
        assert_eq!(list_in(&mut session).toolbar, "delete_selected");
        session.request_delete();

        let deleted = confirm_delete_in(&mut session);
        assert!(deleted.ok);
        assert_eq!(deleted.deleted, 1);
        assert_eq!(list_in(&mut session).items.len(), 1);
    }

    #[test]
    fn malformed_ids_fail_without_panicking() {
        let mut session = seeded();

        assert!(!toggle_in(&mut session, "not-a-uuid", true).ok);
        assert!(!update_content_in(&mut session, "", "x".to_string()).ok);
    }
}
