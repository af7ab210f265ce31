//! Presentation layer between UI shells and the note store.
//!
//! # Responsibility
//! - Project store contents into toolkit-neutral view models.
//! - Route add/edit/delete intents into store mutations.
//! - Track per-note edit surfaces.
//!
//! # Invariants
//! - Rendering never mutates the store.
//! - Every intent reports the minimal view change to apply.

pub mod form;
pub mod note_presenter;
pub mod view;
