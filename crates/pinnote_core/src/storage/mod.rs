//! Durable persistence: local key-value store and the state adapter over it.
//!
//! # Responsibility
//! - Abstract the single-key local store the note state round-trips through.
//! - Keep serialization and fallback policy out of the domain layer.
//!
//! # Invariants
//! - The whole collection persists under exactly one key as one JSON blob.
//! - Load never fails outward: absent or corrupt state yields the bootstrap
//!   sample state. Save never fails outward: write errors are logged and
//!   dropped.

pub mod adapter;
pub mod kv;
