//! Toolkit-neutral view models.

use crate::model::note::{Note, NoteId};
use serde::Serialize;

/// Heading shown above the note list.
pub const NOTE_LIST_HEADING: &str = "Your notes";

/// Affordances attached to every rendered note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    Edit,
    Delete,
}

/// One visual block per note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteBlock {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
    pub actions: Vec<NoteAction>,
}

impl NoteBlock {
    pub fn from_note(note: &Note) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            actions: vec![NoteAction::Edit, NoteAction::Delete],
        }
    }
}

/// Full projection of the store, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListView {
    pub heading: &'static str,
    pub blocks: Vec<NoteBlock>,
}

/// Minimal change a shell applies after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    /// New block goes at the end of the list.
    Appended(NoteBlock),
    /// Existing block is replaced in place.
    Updated(NoteBlock),
    /// Block with this id is removed.
    Removed(NoteId),
}

/// Editing surface contents, pre-filled from the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
}

/// Per-note editing surface state.
///
/// `Closed -> Open -> (saved | cancelled) -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSurfaceState {
    Closed,
    Open,
}
