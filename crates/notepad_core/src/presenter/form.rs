//! Add-note form state.
//!
//! # Invariants
//! - A submission needs non-empty content; the title may be empty.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error raised by `AddNoteForm::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFormError {
    EmptyContent,
}

impl Display for NoteFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "You have not left a comment."),
        }
    }
}

impl Error for NoteFormError {}

/// Title/content fields of the add-note surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddNoteForm {
    pub title: String,
    pub content: String,
}

impl AddNoteForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    /// Returns `(title, content)` ready for the add intent.
    pub fn submit(&self) -> Result<(String, String), NoteFormError> {
        if self.content.is_empty() {
            return Err(NoteFormError::EmptyContent);
        }
        Ok((self.title.clone(), self.content.clone()))
    }
}
