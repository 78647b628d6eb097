//! In-memory note collection and every state-transition operation.
//!
//! # Responsibility
//! - Own the ordered note list and the monotonic id counter.
//! - Apply all mutations; callers re-render from `list()` afterwards.
//!
//! # Invariants
//! - Ids are unique across the collection and never reused after deletion.
//! - `next_id` always exceeds every id ever issued.
//! - Stale references (missing id, out-of-bounds item index) are silent
//!   no-ops: the UI may hold indices computed before an intervening deletion.

use crate::model::note::{ChecklistItem, Note, NoteContent, NoteId, NoteKind};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Operation error for mutations that signal instead of no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No note with the given id exists.
    NotFound(NoteId),
    /// Replacement content shape contradicts the note's fixed kind.
    ContentKindMismatch { id: NoteId, expected: NoteKind },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::ContentKindMismatch { id, expected } => {
                write!(f, "note {id} is a {expected} note; content shape must match")
            }
        }
    }
}

impl Error for StoreError {}

/// Rejection reasons for persisted state that violates collection invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Two persisted notes share one id.
    DuplicateId(NoteId),
    /// Stored counter does not exceed every persisted id.
    CounterNotAhead { next_id: NoteId, max_id: NoteId },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate note id {id} in persisted state"),
            Self::CounterNotAhead { next_id, max_id } => write!(
                f,
                "persisted nextId {next_id} does not exceed highest note id {max_id}"
            ),
        }
    }
}

impl Error for StateError {}

/// Authoritative in-memory state: ordered notes plus the id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    notes: Vec<Note>,
    next_id: NoteId,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    /// Empty collection; first created note receives id 1.
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from persisted state, rejecting invariant violations
    /// instead of masking them. Rejections feed the load-time fallback.
    pub fn from_state(notes: Vec<Note>, next_id: NoteId) -> Result<Self, StateError> {
        let mut seen = HashSet::with_capacity(notes.len());
        let mut max_id = 0;
        for note in &notes {
            if !seen.insert(note.id) {
                return Err(StateError::DuplicateId(note.id));
            }
            max_id = max_id.max(note.id);
        }

        if next_id <= max_id {
            return Err(StateError::CounterNotAhead { next_id, max_id });
        }

        Ok(Self { notes, next_id })
    }

    /// Current display order. Callers must not mutate notes directly; all
    /// mutation goes through the operations on this type.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up one note by id (view-session use).
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Next id the counter will issue. Part of the persisted state.
    pub fn next_id(&self) -> NoteId {
        self.next_id
    }

    /// Creates an empty note of `kind` at the front of the collection
    /// (most-recent-first) and returns it.
    pub fn create(&mut self, kind: NoteKind) -> &Note {
        let note = Note::new(self.next_id, kind);
        self.next_id += 1;
        self.notes.insert(0, note);
        debug!(
            "event=note_create module=store status=ok id={} kind={}",
            self.notes[0].id, kind
        );
        &self.notes[0]
    }

    /// Removes the note with `id`. Idempotent: a missing id is a no-op.
    pub fn delete(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=store status=skip reason=missing_note id={id}");
        }
    }

    /// Commits an edit session: replaces title and content wholesale.
    ///
    /// The title is trimmed and falls back to the kind default when empty.
    /// The caller reconstructs checklist content from its edit-session state
    /// before calling this.
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: &str,
        content: NoteContent,
    ) -> Result<(), StoreError> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let expected = note.kind();
        if content.kind() != expected {
            return Err(StoreError::ContentKindMismatch { id, expected });
        }

        let trimmed = title.trim();
        note.title = if trimmed.is_empty() {
            expected.default_title().to_string()
        } else {
            trimmed.to_string()
        };
        note.content = content;
        note.touch();
        Ok(())
    }

    /// Sets one checklist item's completed flag.
    pub fn toggle_item(&mut self, id: NoteId, index: usize, completed: bool) {
        let Some(items) = self.checklist_items("toggle_item", id) else {
            return;
        };
        let Some(item) = items.get_mut(index) else {
            debug!(
                "event=toggle_item module=store status=skip reason=index_out_of_bounds id={id} index={index}"
            );
            return;
        };
        item.completed = completed;
        self.touch(id);
    }

    /// Replaces one checklist item's text in place.
    pub fn set_item_text(&mut self, id: NoteId, index: usize, text: &str) {
        let Some(items) = self.checklist_items("set_item_text", id) else {
            return;
        };
        let Some(item) = items.get_mut(index) else {
            debug!(
                "event=set_item_text module=store status=skip reason=index_out_of_bounds id={id} index={index}"
            );
            return;
        };
        item.text = text.to_string();
        self.touch(id);
    }

    /// Removes one checklist item; later items shift down one index.
    pub fn delete_item(&mut self, id: NoteId, index: usize) {
        let Some(items) = self.checklist_items("delete_item", id) else {
            return;
        };
        if index >= items.len() {
            debug!(
                "event=delete_item module=store status=skip reason=index_out_of_bounds id={id} index={index}"
            );
            return;
        }
        items.remove(index);
        self.touch(id);
    }

    /// Appends a not-completed item; whitespace-only text appends nothing.
    pub fn add_item(&mut self, id: NoteId, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        let Some(items) = self.checklist_items("add_item", id) else {
            return;
        };
        items.push(ChecklistItem::new(trimmed));
        self.touch(id);
    }

    /// Moves `dragged` to the position `target` currently occupies.
    ///
    /// Remove-then-insert semantics: every note between the two original
    /// positions shifts by one. No-op when either id is missing or both are
    /// the same note. Positions change; identity and content do not.
    pub fn reorder(&mut self, dragged: NoteId, target: NoteId) {
        let Some(dragged_index) = self.position(dragged) else {
            debug!("event=note_reorder module=store status=skip reason=missing_note id={dragged}");
            return;
        };
        let Some(target_index) = self.position(target) else {
            debug!("event=note_reorder module=store status=skip reason=missing_note id={target}");
            return;
        };
        if dragged_index == target_index {
            return;
        }

        let note = self.notes.remove(dragged_index);
        self.notes.insert(target_index, note);
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn touch(&mut self, id: NoteId) {
        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.touch();
        }
    }

    /// Mutable checklist access for item operations, applying the silent
    /// stale-reference policy for missing notes and text notes.
    fn checklist_items(&mut self, op: &str, id: NoteId) -> Option<&mut Vec<ChecklistItem>> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event={op} module=store status=skip reason=missing_note id={id}");
            return None;
        };
        match &mut note.content {
            NoteContent::Checklist(items) => Some(items),
            NoteContent::Text(_) => {
                debug!("event={op} module=store status=skip reason=not_a_checklist id={id}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StateError};
    use crate::model::note::{Note, NoteKind};

    #[test]
    fn from_state_rejects_duplicate_ids() {
        let notes = vec![Note::new(3, NoteKind::Text), Note::new(3, NoteKind::Text)];
        let err = NoteStore::from_state(notes, 4).unwrap_err();
        assert_eq!(err, StateError::DuplicateId(3));
    }

    #[test]
    fn from_state_rejects_counter_at_or_below_highest_id() {
        let notes = vec![Note::new(5, NoteKind::Text)];
        let err = NoteStore::from_state(notes, 5).unwrap_err();
        assert_eq!(
            err,
            StateError::CounterNotAhead {
                next_id: 5,
                max_id: 5
            }
        );
    }

    #[test]
    fn from_state_accepts_valid_snapshot() {
        let notes = vec![Note::new(2, NoteKind::Text), Note::new(1, NoteKind::Text)];
        let store = NoteStore::from_state(notes, 3).unwrap();
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.list().len(), 2);
    }
}
