use chrono::{TimeZone, Utc};
use docdesk_core::{
    BulkActionController, DeleteFlow, DocumentListSession, DocumentPatch, DocumentStore,
    InMemoryDocumentRepository, ManualClock, RecordingNavigator, SelectionStatus, SessionConfig,
    SortKey, ToolbarMode,
};

type Session = DocumentListSession<InMemoryDocumentRepository, ManualClock, RecordingNavigator>;

fn session(config: SessionConfig) -> Session {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let controller = BulkActionController::new(
        DocumentStore::new(InMemoryDocumentRepository::new(), ManualClock::new(start)),
        RecordingNavigator::new(),
    );
    DocumentListSession::new(controller, &config).unwrap()
}

fn seeded() -> Session {
    session(SessionConfig {
        seed_sample_documents: true,
        initial_sort: SortKey::None,
    })
}

fn visible_titles(session: &mut Session) -> Vec<String> {
    session
        .visible()
        .unwrap()
        .into_iter()
        .map(|record| record.title)
        .collect()
}

#[test]
fn seeded_session_lists_samples_newest_first() {
    let mut session = seeded();

    assert_eq!(visible_titles(&mut session), vec!["Fake Doc 2", "Fake Doc 1"]);
    assert_eq!(session.total_label().unwrap(), "Total 2 documents");
    assert_eq!(session.toolbar(), ToolbarMode::SortPicker);
}

#[test]
fn empty_session_has_unchecked_header() {
    let mut session = session(SessionConfig::default());

    assert!(session.rows().unwrap().is_empty());
    assert_eq!(session.header_checkbox().unwrap(), SelectionStatus::default());
    assert_eq!(session.total_label().unwrap(), "Total 0 document");
}

#[test]
fn new_documents_appear_first_in_default_order() {
    let mut session = seeded();

    session.create_document("Report").unwrap().unwrap();

    assert_eq!(
        visible_titles(&mut session),
        vec!["Report", "Fake Doc 2", "Fake Doc 1"]
    );
}

#[test]
fn search_and_sort_drive_visible_rows() {
    let mut session = seeded();
    session.create_document("Agenda").unwrap();

    session.set_sort_key(SortKey::from_option_value("title"));
    assert_eq!(
        visible_titles(&mut session),
        vec!["Agenda", "Fake Doc 1", "Fake Doc 2"]
    );

    session.set_search_text("DOC 2");
    assert_eq!(visible_titles(&mut session), vec!["Fake Doc 2"]);

    session.set_search_text("");
    session.set_sort_key(SortKey::from_option_value(""));
    assert_eq!(
        visible_titles(&mut session),
        vec!["Agenda", "Fake Doc 2", "Fake Doc 1"]
    );
}

#[test]
fn select_all_covers_visible_rows_only() {
    let mut session = seeded();
    session.set_search_text("doc 1");

    session.toggle_all(true).unwrap();
    assert_eq!(
        session.header_checkbox().unwrap(),
        SelectionStatus {
            all_checked: true,
            indeterminate: false,
        }
    );

    session.set_search_text("");
    assert_eq!(
        session.header_checkbox().unwrap(),
        SelectionStatus {
            all_checked: false,
            indeterminate: true,
        }
    );

    let rows = session.rows().unwrap();
    let checked: Vec<&str> = rows
        .iter()
        .filter(|row| row.checked)
        .map(|row| row.record.title.as_str())
        .collect();
    assert_eq!(checked, vec!["Fake Doc 1"]);
}

#[test]
fn toolbar_switches_to_delete_while_selected() {
    let mut session = seeded();
    let ids = session.visible_ids().unwrap();

    session.toggle(ids[0], true).unwrap();
    assert_eq!(session.toolbar(), ToolbarMode::DeleteSelected);

    session.toggle(ids[0], false).unwrap();
    assert_eq!(session.toolbar(), ToolbarMode::SortPicker);
}

#[test]
fn confirmed_delete_refreshes_rows_and_selection() {
    let mut session = seeded();
    session.toggle_all(true).unwrap();

    assert_eq!(session.request_delete(), DeleteFlow::ConfirmPending);
    assert_eq!(session.delete_flow(), DeleteFlow::ConfirmPending);
    assert_eq!(session.confirm_delete().unwrap(), 2);

    assert!(session.rows().unwrap().is_empty());
    assert_eq!(session.header_checkbox().unwrap(), SelectionStatus::default());
    assert_eq!(session.toolbar(), ToolbarMode::SortPicker);
    assert_eq!(session.delete_flow(), DeleteFlow::Idle);
}

#[test]
fn projection_is_reused_until_store_or_query_changes() {
    let mut session = seeded();

    session.visible().unwrap();
    session.rows().unwrap();
    session.header_checkbox().unwrap();
    assert_eq!(session.projection_computations(), 1);

    let id = session.visible_ids().unwrap()[0];
    session.toggle(id, true).unwrap();
    session.rows().unwrap();
    assert_eq!(session.projection_computations(), 1);

    session
        .update_document(id, &DocumentPatch::content("edited"))
        .unwrap();
    session.rows().unwrap();
    assert_eq!(session.projection_computations(), 2);

    session.set_search_text("fake");
    session.rows().unwrap();
    assert_eq!(session.projection_computations(), 3);
}

#[test]
fn rows_serialize_with_camel_case_fields() {
    let mut session = seeded();
    let rows = session.rows().unwrap();

    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["title"], "Fake Doc 2");
    assert_eq!(json["content"], "Fake Doc 2 content");
    assert_eq!(json["checked"], false);
    assert!(json["createdAt"].as_str().unwrap().starts_with("2021-06-12"));
    assert!(json.get("updatedAt").is_some());
}
