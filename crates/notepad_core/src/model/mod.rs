//! Domain model for notes.
//!
//! # Responsibility
//! - Define the single entity held by the note store.
//!
//! # Invariants
//! - A note is identified in memory by a process-local `NoteId`.
//! - Ids are never persisted; they are regenerated on every load.

pub mod note;
