use chrono::{Duration, TimeZone, Utc};
use docdesk_core::{
    DocumentPatch, DocumentRecord, DocumentStore, InMemoryDocumentRepository, ManualClock,
    StoreError, StoreEvent,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn manual_store() -> DocumentStore<InMemoryDocumentRepository, ManualClock> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    DocumentStore::new(
        InMemoryDocumentRepository::new(),
        ManualClock::with_step(start, Duration::minutes(1)),
    )
}

#[test]
fn create_appends_one_record_with_fresh_id() {
    let mut store = manual_store();
    let mut seen = HashSet::new();

    for title in ["Alpha", "Beta", "  Gamma  ", "Alpha"] {
        let before = store.len().unwrap();
        let record = store.create(title).unwrap();
        assert_eq!(store.len().unwrap(), before + 1);
        assert!(seen.insert(record.id), "id reused: {}", record.id);
        assert_eq!(record.content, "");
        assert_eq!(record.created_at, record.updated_at);
    }

    let titles: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "  Gamma  ", "Alpha"]);
}

#[test]
fn create_rejects_whitespace_titles_without_mutation() {
    let mut store = manual_store();
    store.create("Keep").unwrap();
    let before = store.list().unwrap();

    for title in ["", " ", "\t\n", "   "] {
        assert_eq!(store.create(title).unwrap_err(), StoreError::InvalidTitle);
    }

    assert_eq!(store.list().unwrap(), before);
    assert_eq!(store.revision(), 1);
}

#[test]
fn list_returns_a_snapshot() {
    let mut store = manual_store();
    let record = store.create("Original").unwrap();
    let mut snapshot = store.list().unwrap();
    snapshot[0].title = "Changed locally".to_string();

    assert_eq!(store.get(record.id).unwrap().unwrap().title, "Original");
}

#[test]
fn delete_many_is_idempotent_and_ignores_unknown_ids() {
    let mut store = manual_store();
    let a = store.create("A").unwrap();
    let b = store.create("B").unwrap();
    let c = store.create("C").unwrap();
    let ids = BTreeSet::from([a.id, c.id, Uuid::new_v4()]);

    assert_eq!(store.delete_many(&ids).unwrap(), 2);
    let after_once = store.list().unwrap();
    let revision_once = store.revision();

    assert_eq!(store.delete_many(&ids).unwrap(), 0);
    assert_eq!(store.list().unwrap(), after_once);
    assert_eq!(store.revision(), revision_once);
    assert_eq!(after_once, vec![b]);
}

#[test]
fn update_applies_patch_and_reports_missing_id() {
    let mut store = manual_store();
    let record = store.create("Draft").unwrap();

    let renamed = store
        .update(
            record.id,
            &DocumentPatch {
                title: Some(" Final ".to_string()),
                content: Some("<p>body</p>".to_string()),
            },
        )
        .unwrap();
    assert_eq!(renamed.title, " Final ");
    assert_eq!(renamed.content, "<p>body</p>");
    assert!(renamed.updated_at >= renamed.created_at);
    assert_eq!(store.get(record.id).unwrap().unwrap(), renamed);

    let missing = Uuid::new_v4();
    assert_eq!(
        store
            .update(missing, &DocumentPatch::content("x"))
            .unwrap_err(),
        StoreError::NotFound(missing)
    );
}

#[test]
fn insert_rejects_duplicate_ids() {
    let mut store = manual_store();
    let now = Utc.with_ymd_and_hms(2022, 2, 2, 0, 0, 0).unwrap();
    let record = DocumentRecord::new("Imported", now).unwrap();

    store.insert(record.clone()).unwrap();
    assert_eq!(
        store.insert(record.clone()).unwrap_err(),
        StoreError::DuplicateId(record.id)
    );
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn subscribers_see_every_applied_mutation_in_order() {
    let mut store = manual_store();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let record = store.create("Watched").unwrap();
    store
        .update(record.id, &DocumentPatch::title("Renamed"))
        .unwrap();
    store.create("  ").unwrap_err();
    store.delete_many(&BTreeSet::from([record.id])).unwrap();
    store.delete_many(&BTreeSet::from([record.id])).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            StoreEvent::Created {
                id: record.id,
                revision: 1
            },
            StoreEvent::Updated {
                id: record.id,
                revision: 2
            },
            StoreEvent::Deleted {
                ids: vec![record.id],
                revision: 3
            },
        ]
    );
    assert_eq!(store.revision(), 3);
}

#[test]
fn empty_patch_leaves_record_revision_and_listeners_untouched() {
    let mut store = manual_store();
    let created = store.create("Draft").unwrap();
    let events = Arc::new(Mutex::new(Vec::<StoreEvent>::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let returned = store.update(created.id, &DocumentPatch::default()).unwrap();

    assert_eq!(returned, created);
    assert_eq!(store.get(created.id).unwrap().unwrap().updated_at, created.updated_at);
    assert_eq!(store.revision(), 1);
    assert!(events.lock().unwrap().is_empty());

    let missing = Uuid::new_v4();
    assert_eq!(
        store.update(missing, &DocumentPatch::default()).unwrap_err(),
        StoreError::NotFound(missing)
    );
}

#[test]
fn create_with_stores_initial_content() {
    let mut store = manual_store();
    let events = Arc::new(Mutex::new(Vec::<StoreEvent>::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let record = store
        .create_with("Imported", "{\"blocks\":[{\"type\":\"paragraph\"}]}")
        .unwrap();

    assert_eq!(record.content, "{\"blocks\":[{\"type\":\"paragraph\"}]}");
    assert_eq!(record.created_at, record.updated_at);
    assert_eq!(store.get(record.id).unwrap().unwrap(), record);
    assert_eq!(store.ids().unwrap(), vec![record.id]);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].revision(), store.revision());
}
