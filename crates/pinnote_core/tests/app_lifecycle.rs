use pinnote_core::{NoteContent, NoteKind, NotesApp, SqliteKeyValueStore, StoreError};
use std::path::Path;

fn open_app(path: &Path) -> NotesApp<SqliteKeyValueStore> {
    NotesApp::open(SqliteKeyValueStore::open(path).unwrap())
}

#[test]
fn state_survives_reopen_without_explicit_flush() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let list_id = {
        let mut app = open_app(&db_path);
        let list_id = app.create(NoteKind::Checklist);
        app.add_item(list_id, "milk");
        app.add_item(list_id, "eggs");
        app.toggle_item(list_id, 0, true);
        app.update_note(
            list_id,
            "Groceries",
            app.note(list_id).unwrap().content.clone(),
        )
        .unwrap();
        list_id
        // App dropped here; every mutation already saved synchronously.
    };

    let app = NotesApp::open(SqliteKeyValueStore::open(&db_path).unwrap());
    let note = app.note(list_id).expect("checklist should survive reopen");
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.checklist_progress(), Some((1, 2)));
    // The bootstrap welcome note from the first open is still present.
    assert_eq!(app.notes().len(), 2);
}

#[test]
fn first_open_bootstraps_sample_note_and_later_ids_continue_from_counter() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let mut app = open_app(&db_path);
    assert_eq!(app.notes().len(), 1);
    assert_eq!(app.notes()[0].id, 1);

    let created = app.create(NoteKind::Text);
    assert_eq!(created, 2);
    assert_eq!(app.notes()[0].id, created);
}

#[test]
fn reorder_and_delete_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let order = {
        let mut app = open_app(&db_path);
        let a = app.create(NoteKind::Text);
        let b = app.create(NoteKind::Text);
        let c = app.create(NoteKind::Text);
        // Display order is [c, b, a, sample]; drop the sample, then drag c
        // onto a's position.
        app.delete(1);
        app.reorder(c, a);
        assert_eq!(b, 3);
        app.notes().iter().map(|note| note.id).collect::<Vec<_>>()
    };

    let app = open_app(&db_path);
    let reopened: Vec<_> = app.notes().iter().map(|note| note.id).collect();
    assert_eq!(reopened, order);
}

#[test]
fn update_note_on_missing_id_reports_not_found_and_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let mut app = open_app(&db_path);
    let before = app.notes().to_vec();

    let err = app
        .update_note(999, "ghost", NoteContent::Text(String::new()))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(999));
    assert_eq!(app.notes(), before.as_slice());
}

#[test]
fn flush_rewrites_current_state() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let mut app = open_app(&db_path);
    let id = app.create(NoteKind::Text);
    app.flush();

    let reopened = open_app(&db_path);
    assert!(reopened.note(id).is_some());
}
