//! Application facade wiring the note store to its persistence adapter.
//!
//! # Responsibility
//! - Own one explicitly constructed app instance per process (no global
//!   singleton); load state once at open.
//! - Persist synchronously after every mutation so the UI can crash-restart
//!   without losing committed edits.
//!
//! # Invariants
//! - Every mutating call saves before returning.
//! - `notes()` is the only read surface the presentation layer renders from.

use crate::model::note::{Note, NoteContent, NoteId, NoteKind};
use crate::store::{NoteStore, StoreError};
use crate::storage::adapter::PersistenceAdapter;
use crate::storage::kv::KeyValueStore;

/// One running note application: in-memory state plus its durable backing.
pub struct NotesApp<S: KeyValueStore> {
    store: NoteStore,
    persistence: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> NotesApp<S> {
    /// Opens the app over the given local store, loading prior state (or the
    /// bootstrap sample state) exactly once.
    pub fn open(kv: S) -> Self {
        let mut persistence = PersistenceAdapter::new(kv);
        let store = persistence.load();
        Self { store, persistence }
    }

    /// Current display ordering for re-render after any operation.
    pub fn notes(&self) -> &[Note] {
        self.store.list()
    }

    /// Looks up one note for a view session.
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    /// Creates an empty note of `kind` at the front and returns its id.
    pub fn create(&mut self, kind: NoteKind) -> NoteId {
        let id = self.store.create(kind).id;
        self.persist();
        id
    }

    /// Deletes a note; idempotent. The surrounding UI confirms intent first.
    pub fn delete(&mut self, id: NoteId) {
        self.store.delete(id);
        self.persist();
    }

    /// Commits an edit session (title + wholesale content replacement).
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: &str,
        content: NoteContent,
    ) -> Result<(), StoreError> {
        let result = self.store.update_note(id, title, content);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    /// Sets one checklist item's completed flag; stale references no-op.
    pub fn toggle_item(&mut self, id: NoteId, index: usize, completed: bool) {
        self.store.toggle_item(id, index, completed);
        self.persist();
    }

    /// Replaces one checklist item's text; stale references no-op.
    pub fn set_item_text(&mut self, id: NoteId, index: usize, text: &str) {
        self.store.set_item_text(id, index, text);
        self.persist();
    }

    /// Removes one checklist item; stale references no-op.
    pub fn delete_item(&mut self, id: NoteId, index: usize) {
        self.store.delete_item(id, index);
        self.persist();
    }

    /// Appends a checklist item; whitespace-only text appends nothing.
    pub fn add_item(&mut self, id: NoteId, text: &str) {
        self.store.add_item(id, text);
        self.persist();
    }

    /// Moves `dragged` to `target`'s position; missing/equal ids no-op.
    pub fn reorder(&mut self, dragged: NoteId, target: NoteId) {
        self.store.reorder(dragged, target);
        self.persist();
    }

    /// Re-saves current state. The presentation layer calls this on
    /// visibility-change and before-unload analogs to minimize data loss
    /// from an unflushed state.
    pub fn flush(&mut self) {
        self.persist();
    }

    fn persist(&mut self) {
        self.persistence
            .save(self.store.list(), self.store.next_id());
    }
}
