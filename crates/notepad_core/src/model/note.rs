//! Note domain model.
//!
//! # Responsibility
//! - Define the `title`/`content` record persisted as one line on disk.
//! - Give every in-memory note a handle that survives edits and reorders.
//!
//! # Invariants
//! - `id` is unique within one process and never written to disk.
//! - `title` and `content` may both be empty.

use uuid::Uuid;

/// Process-local handle for one note in the store.
///
/// Two notes with identical title and content still get distinct ids, so
/// edit/delete intents address exactly the entry the user acted on.
pub type NoteId = Uuid;

/// One short text note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// In-memory handle; not part of the file format.
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns `(title, content)`, the part of a note that survives a reload.
    pub fn fields(&self) -> (&str, &str) {
        (self.title.as_str(), self.content.as_str())
    }

    /// Replaces both fields, keeping the id.
    pub fn overwrite(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }
}
