//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pinnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pinnote_core::{NoteKind, NotesApp, SqliteKeyValueStore};

fn main() {
    println!("pinnote_core version={}", pinnote_core::core_version());

    match SqliteKeyValueStore::open_in_memory() {
        Ok(kv) => {
            let mut app = NotesApp::open(kv);
            app.create(NoteKind::Checklist);
            println!("pinnote_core smoke notes={}", app.notes().len());
        }
        Err(err) => {
            eprintln!("pinnote_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}
