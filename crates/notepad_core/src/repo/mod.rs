//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-list load/save contract the store depends on.
//! - Isolate file-system details from store/presenter orchestration.
//!
//! # Invariants
//! - Repositories never hold note state; the store owns the list.

pub mod note_repo;
