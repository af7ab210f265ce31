//! Note presenter: projection plus intent routing.
//!
//! # Responsibility
//! - Render the store as a `NoteListView`.
//! - Forward add/edit/delete intents to the store and report `ViewChange`s.
//! - Hold the open edit surfaces for the session.
//!
//! # Invariants
//! - Cancelling an edit never calls the store.
//! - Confirming an edit requires an open surface for that note.
//! - Deleting a note closes its edit surface.

use crate::model::note::NoteId;
use crate::presenter::view::{
    EditDraft, EditSurfaceState, NoteBlock, NoteListView, ViewChange, NOTE_LIST_HEADING,
};
use crate::repo::note_repo::NoteRepository;
use crate::store::note_store::{NoteStore, StoreError};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PresenterResult<T> = Result<T, PresenterError>;

/// Presenter error for UI intents.
#[derive(Debug)]
pub enum PresenterError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Confirm arrived for a note with no open edit surface.
    EditorNotOpen(NoteId),
    /// Store-layer failure.
    Store(StoreError),
}

impl Display for PresenterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::EditorNotOpen(id) => write!(f, "no open editor for note {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PresenterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PresenterError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NoteNotFound(id) => Self::NoteNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Presenter facade over one session-owned store.
pub struct NotePresenter<R: NoteRepository> {
    store: NoteStore<R>,
    open_editors: HashSet<NoteId>,
}

impl<R: NoteRepository> NotePresenter<R> {
    pub fn new(store: NoteStore<R>) -> Self {
        Self {
            store,
            open_editors: HashSet::new(),
        }
    }

    pub fn store(&self) -> &NoteStore<R> {
        &self.store
    }

    /// Projects every note into a block, in list order.
    pub fn render(&self) -> NoteListView {
        NoteListView {
            heading: NOTE_LIST_HEADING,
            blocks: self.store.notes().iter().map(NoteBlock::from_note).collect(),
        }
    }

    /// Adds a note and returns only the new block.
    pub fn on_add_requested(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> PresenterResult<ViewChange> {
        let id = self.store.add(title, content);
        self.block_for(id).map(ViewChange::Appended)
    }

    /// Opens the edit surface for `id`, pre-filled with current values.
    pub fn on_edit_requested(&mut self, id: NoteId) -> PresenterResult<EditDraft> {
        let note = self.store.get(id).ok_or(PresenterError::NoteNotFound(id))?;
        let draft = EditDraft {
            note_id: id,
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.open_editors.insert(id);
        debug!(
            "event=editor_open module=presenter status=ok note_id={} open_editors={}",
            id,
            self.open_editors.len()
        );
        Ok(draft)
    }

    /// Saves an open edit surface and returns the updated block.
    pub fn on_edit_confirmed(&mut self, draft: EditDraft) -> PresenterResult<ViewChange> {
        let id = draft.note_id;
        if !self.open_editors.contains(&id) {
            warn!("event=editor_save module=presenter status=error error_code=not_open note_id={id}");
            return Err(PresenterError::EditorNotOpen(id));
        }

        let result = self.store.edit(id, draft.title, draft.content);
        self.open_editors.remove(&id);
        result?;
        debug!("event=editor_save module=presenter status=ok note_id={id}");
        self.block_for(id).map(ViewChange::Updated)
    }

    /// Closes an edit surface without saving. Returns whether one was open.
    pub fn on_edit_cancelled(&mut self, id: NoteId) -> bool {
        let was_open = self.open_editors.remove(&id);
        debug!("event=editor_cancel module=presenter status=ok note_id={id} was_open={was_open}");
        was_open
    }

    pub fn edit_state(&self, id: NoteId) -> EditSurfaceState {
        if self.open_editors.contains(&id) {
            EditSurfaceState::Open
        } else {
            EditSurfaceState::Closed
        }
    }

    /// Deletes a note and returns the block to remove.
    pub fn on_delete_requested(&mut self, id: NoteId) -> PresenterResult<ViewChange> {
        self.store.delete(id)?;
        self.open_editors.remove(&id);
        Ok(ViewChange::Removed(id))
    }

    /// User-visible status for a pending save failure, if any.
    pub fn take_status(&mut self) -> Option<String> {
        self.store
            .take_persist_warning()
            .map(|warning| format!("Changes were not saved: {warning}"))
    }

    fn block_for(&self, id: NoteId) -> PresenterResult<NoteBlock> {
        self.store
            .get(id)
            .map(NoteBlock::from_note)
            .ok_or(PresenterError::NoteNotFound(id))
    }
}
