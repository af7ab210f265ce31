//! Note store over a whole-list repository.
//!
//! # Responsibility
//! - Load the note list once at construction.
//! - Apply add/edit/delete intents to the list in place.
//! - Rewrite the whole backing file after every mutation.
//!
//! # Invariants
//! - Every successful mutation triggers exactly one `persist()`.
//! - Load failures never escape: they yield an empty list.
//! - Persist failures keep the in-memory change and are recorded as a
//!   pending warning instead of failing the mutation.
//! - Unknown ids fail with `NoteNotFound` and do not touch the backing file.

use crate::codec::line::is_line_safe;
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Target note is not in the list.
    NoteNotFound(NoteId),
    /// Backing file could not be rewritten.
    Persist(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Persist(err) => write!(f, "failed to save notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoteNotFound(_) => None,
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Session-owned note list plus its backing repository.
pub struct NoteStore<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
    persist_warning: Option<String>,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Creates a store and populates it from the repository.
    pub fn open(repo: R) -> Self {
        let mut store = Self {
            repo,
            notes: Vec::new(),
            persist_warning: None,
        };
        store.notes = store.load();
        store
    }

    /// Reads the backing file in file order.
    ///
    /// A missing file means "no notes yet"; an unreadable one is logged and
    /// also yields an empty list.
    pub fn load(&self) -> Vec<Note> {
        match self.repo.load_notes() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok count={} location={}",
                    notes.len(),
                    self.repo.location()
                );
                notes
            }
            Err(RepoError::NotFound(_)) => {
                info!(
                    "event=notes_load module=store status=empty reason=missing_file location={}",
                    self.repo.location()
                );
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Appends a note and persists. Returns the new note id.
    pub fn add(&mut self, title: impl Into<String>, content: impl Into<String>) -> NoteId {
        let note = Note::new(title, content);
        let id = note.id;
        self.notes.push(note);
        info!(
            "event=note_add module=store status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        self.sync();
        id
    }

    /// Overwrites one note in place (order unchanged) and persists.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is not in the list; nothing is written.
    pub fn edit(
        &mut self,
        id: NoteId,
        new_title: impl Into<String>,
        new_content: impl Into<String>,
    ) -> StoreResult<()> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            warn!("event=note_edit module=store status=error error_code=not_found note_id={id}");
            return Err(StoreError::NoteNotFound(id));
        };

        note.overwrite(new_title, new_content);
        info!("event=note_edit module=store status=ok note_id={id}");
        self.sync();
        Ok(())
    }

    /// Removes the first entry matching `id` and persists.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is not in the list; nothing is written.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<Note> {
        let Some(index) = self.position(id) else {
            warn!("event=note_delete module=store status=error error_code=not_found note_id={id}");
            return Err(StoreError::NoteNotFound(id));
        };

        let removed = self.notes.remove(index);
        info!(
            "event=note_delete module=store status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        self.sync();
        Ok(removed)
    }

    /// Serializes the whole list and overwrites the backing file.
    pub fn persist(&self) -> StoreResult<()> {
        let ambiguous = self
            .notes
            .iter()
            .filter(|note| !is_line_safe(&note.title, &note.content))
            .count();
        if ambiguous > 0 {
            warn!(
                "event=notes_persist module=store status=warn reason=ambiguous_lines count={}",
                ambiguous
            );
        }

        self.repo.save_notes(&self.notes)?;
        Ok(())
    }

    /// Pending warning from the last failed rewrite, if any.
    pub fn persist_warning(&self) -> Option<&str> {
        self.persist_warning.as_deref()
    }

    /// Returns and clears the pending persistence warning.
    pub fn take_persist_warning(&mut self) -> Option<String> {
        self.persist_warning.take()
    }

    fn sync(&mut self) {
        match self.persist() {
            Ok(()) => self.persist_warning = None,
            Err(err) => {
                error!(
                    "event=notes_persist module=store status=error error_code=persist_failed count={} error={}",
                    self.notes.len(),
                    err
                );
                self.persist_warning = Some(err.to_string());
            }
        }
    }
}
