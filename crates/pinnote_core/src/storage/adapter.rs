//! Persistence adapter: one JSON blob under one key, never failing outward.
//!
//! # Responsibility
//! - Round-trip the full `(notes, next_id)` state through a key-value store.
//! - Supply the bootstrap sample state when no usable prior state exists.
//!
//! # Invariants
//! - `load` always returns a usable store; parse and invariant failures are
//!   logged and replaced by the sample state, never propagated.
//! - `save` never propagates write failures; a failed save means the mutation
//!   is simply not durable.
//! - Persisted blobs carry the format `version` tag.

use crate::model::note::{Note, NoteContent, NoteId, NoteKind};
use crate::store::{NoteStore, StateError};
use crate::storage::kv::{KeyValueStore, StorageError};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The single key the whole collection persists under.
pub const STORAGE_KEY: &str = "pinnote.notes";

/// Format tag written into every persisted blob.
pub const STORE_FORMAT_VERSION: &str = "1.0.0";

const SAMPLE_NOTE_ID: NoteId = 1;
const SAMPLE_NOTE_TITLE: &str = "Welcome to Pinnote!";
const SAMPLE_NOTE_BODY: &str = "This is a sample note to get you started. You can create text \
     notes and checklists. Your notes are saved on this device and will still be here the next \
     time you open the app.";

/// Failure inside a load/save attempt. Stays internal to this module's
/// logging; callers only ever see the fallback behavior.
#[derive(Debug)]
enum PersistError {
    Storage(StorageError),
    Json(serde_json::Error),
    State(StateError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::State(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::State(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<StateError> for PersistError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

/// Owned wire shape of the persisted blob.
#[derive(Deserialize)]
struct PersistedState {
    notes: Vec<Note>,
    #[serde(rename = "nextId")]
    next_id: NoteId,
    #[allow(dead_code)]
    version: String,
}

/// Borrowing counterpart used on the write path.
#[derive(Serialize)]
struct PersistedStateRef<'a> {
    notes: &'a [Note],
    #[serde(rename = "nextId")]
    next_id: NoteId,
    version: &'a str,
}

/// Serializes/deserializes the note state to one key in a local store.
pub struct PersistenceAdapter<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Consumes the adapter, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Reads the persisted state, falling back to the bootstrap sample state
    /// when nothing usable is stored. Never fails outward.
    ///
    /// The fallback is persisted immediately so a first launch and a launch
    /// after corruption both leave durable state behind.
    pub fn load(&mut self) -> NoteStore {
        match self.try_load() {
            Ok(Some(store)) => {
                info!(
                    "event=notes_load module=storage status=ok count={} next_id={}",
                    store.list().len(),
                    store.next_id()
                );
                store
            }
            Ok(None) => {
                info!("event=notes_load module=storage status=empty fallback=sample");
                let store = bootstrap_store();
                self.save(store.list(), store.next_id());
                store
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=storage status=corrupt fallback=sample error={err}"
                );
                let store = bootstrap_store();
                self.save(store.list(), store.next_id());
                store
            }
        }
    }

    /// Writes the full state under [`STORAGE_KEY`]. Never fails outward;
    /// a write failure is logged and the mutation stays non-durable.
    pub fn save(&mut self, notes: &[Note], next_id: NoteId) {
        match self.try_save(notes, next_id) {
            Ok(()) => {
                debug!(
                    "event=notes_save module=storage status=ok count={} next_id={next_id}",
                    notes.len()
                );
            }
            Err(err) => {
                error!("event=notes_save module=storage status=error error={err}");
            }
        }
    }

    fn try_load(&self) -> Result<Option<NoteStore>, PersistError> {
        let Some(raw) = self.kv.get(STORAGE_KEY)? else {
            return Ok(None);
        };
        let state: PersistedState = serde_json::from_str(&raw)?;
        let store = NoteStore::from_state(state.notes, state.next_id)?;
        Ok(Some(store))
    }

    fn try_save(&mut self, notes: &[Note], next_id: NoteId) -> Result<(), PersistError> {
        let blob = serde_json::to_string(&PersistedStateRef {
            notes,
            next_id,
            version: STORE_FORMAT_VERSION,
        })?;
        self.kv.put(STORAGE_KEY, &blob)?;
        Ok(())
    }
}

/// First-launch state: exactly one welcome note with id 1, counter at 2.
fn bootstrap_store() -> NoteStore {
    let mut welcome = Note::new(SAMPLE_NOTE_ID, NoteKind::Text);
    welcome.title = SAMPLE_NOTE_TITLE.to_string();
    welcome.content = NoteContent::Text(SAMPLE_NOTE_BODY.to_string());
    NoteStore::from_state(vec![welcome], SAMPLE_NOTE_ID + 1)
        .expect("bootstrap state satisfies collection invariants")
}
