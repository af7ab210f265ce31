//! On-disk note encoding.
//!
//! # Responsibility
//! - Map one note to one line of text and back.
//!
//! # Invariants
//! - No header, versioning, or escaping.

pub mod line;
