//! Core note model, persistence, and presentation logic for Notepad.
//! Shells (CLI, FFI) depend on this crate and hold no note state themselves.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod repo;
pub mod store;

pub use config::NotepadConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::note::{Note, NoteId};
pub use presenter::form::{AddNoteForm, NoteFormError};
pub use presenter::note_presenter::{NotePresenter, PresenterError, PresenterResult};
pub use presenter::view::{
    EditDraft, EditSurfaceState, NoteAction, NoteBlock, NoteListView, ViewChange,
    NOTE_LIST_HEADING,
};
pub use repo::note_repo::{FlatFileNoteRepository, NoteRepository, RepoError, RepoResult};
pub use store::note_store::{NoteStore, StoreError, StoreResult};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the flat-file store at `config.notes_file` and wraps it in a presenter.
pub fn open_presenter(config: &NotepadConfig) -> NotePresenter<FlatFileNoteRepository> {
    let repo = FlatFileNoteRepository::new(config.notes_file.clone());
    NotePresenter::new(NoteStore::open(repo))
}
