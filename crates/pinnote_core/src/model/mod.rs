//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the canonical note record and its checklist content shape.
//! - Keep wire-format mapping (storage JSON) next to the types it describes.
//!
//! # Invariants
//! - Every note is identified by a positive integer `NoteId` issued once.
//! - A note's kind is fixed at creation; content shape always matches it.

pub mod note;
