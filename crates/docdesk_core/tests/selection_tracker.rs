use docdesk_core::{SelectionStatus, SelectionTracker};
use uuid::Uuid;

#[test]
fn status_on_empty_visible_set_is_unchecked() {
    let mut selection = SelectionTracker::new();
    selection.toggle(Uuid::new_v4(), true);

    let visible: Vec<Uuid> = Vec::new();
    assert_eq!(
        selection.status(&visible),
        SelectionStatus {
            all_checked: false,
            indeterminate: false,
        }
    );
}

#[test]
fn toggle_all_off_clears_visible_ids_regardless_of_prior_state() {
    let id1 = Uuid::new_v4();
    let id2 = Uuid::new_v4();
    let mut selection = SelectionTracker::new();

    selection.toggle(id1, true);
    selection.toggle_all(false, &[id1, id2]);

    assert!(selection.is_empty());
}

#[test]
fn toggle_all_only_touches_visible_ids() {
    let hidden = Uuid::new_v4();
    let visible = [Uuid::new_v4(), Uuid::new_v4()];
    let mut selection = SelectionTracker::new();
    selection.toggle(hidden, true);

    selection.toggle_all(true, &visible);
    assert_eq!(selection.len(), 3);

    selection.toggle_all(false, &visible);
    assert_eq!(selection.len(), 1);
    assert!(selection.is_selected(hidden));
}

#[test]
fn toggle_is_idempotent() {
    let id = Uuid::new_v4();
    let mut selection = SelectionTracker::new();

    selection.toggle(id, true);
    selection.toggle(id, true);
    assert_eq!(selection.len(), 1);

    selection.toggle(id, false);
    selection.toggle(id, false);
    assert!(selection.is_empty());
}

#[test]
fn prune_and_clear_remove_ids() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut selection = SelectionTracker::new();
    selection.toggle_all(true, &[a, b]);

    selection.prune(&[a]);
    assert!(!selection.is_selected(a));
    assert!(selection.is_selected(b));

    selection.clear();
    assert!(selection.is_empty());
}
