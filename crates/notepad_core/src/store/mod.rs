//! Note store: the authoritative in-memory note list.
//!
//! # Responsibility
//! - Own the note list for the lifetime of a session.
//! - Keep the backing repository in sync after every mutation.
//!
//! # See also
//! - `crate::repo` for the backing medium contract.

pub mod note_store;
