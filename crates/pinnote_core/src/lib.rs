//! Core domain logic for Pinnote, a single-user local note application.
//! This crate owns the note collection, its operations, and persistence;
//! the presentation layer renders from `NotesApp::notes()` and calls back in.

pub mod app;
pub mod escape;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use app::NotesApp;
pub use escape::escape_html;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    ChecklistItem, Note, NoteContent, NoteId, NoteKind, NoteKindParseError, NoteValidationError,
};
pub use storage::adapter::{PersistenceAdapter, STORAGE_KEY, STORE_FORMAT_VERSION};
pub use storage::kv::{KeyValueStore, SqliteKeyValueStore, StorageError, StorageResult};
pub use store::{NoteStore, StateError, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
