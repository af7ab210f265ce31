//! FFI use-case API for the desktop UI shell.
//!
//! # Responsibility
//! - Expose note list/add/edit/delete intents to the UI via FRB.
//! - Own the single process-wide presenter session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Note ids cross the boundary as UUID strings.
//! - The session is opened once, lazily, from `NotepadConfig`.

use notepad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_presenter,
    ping as ping_inner, EditDraft, FlatFileNoteRepository, NoteBlock, NoteId, NotePresenter,
    NotepadConfig, ViewChange,
};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

type Session = NotePresenter<FlatFileNoteRepository>;

static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered note block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Session-local note id in string form.
    pub note_id: String,
    pub title: String,
    pub content: String,
}

/// Rendered note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub heading: String,
    pub items: Vec<NoteItem>,
    /// Empty on success; otherwise why the list could not be produced.
    pub message: String,
}

/// Result envelope for add/edit/delete intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Block to append or replace; `None` for deletes and failures.
    pub item: Option<NoteItem>,
    /// Human-readable message; carries save warnings even when `ok`.
    pub message: String,
}

impl NoteActionResponse {
    fn applied(item: Option<NoteItem>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// Lists every note in file order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match with_session(|session| Ok(session.render())) {
        Ok(view) => NotesListResponse {
            heading: view.heading.to_string(),
            items: view.blocks.iter().map(to_note_item).collect(),
            message: String::new(),
        },
        Err(err) => NotesListResponse {
            heading: String::new(),
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Adds a note. The UI runs the add-note form before calling this.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(title: String, content: String) -> NoteActionResponse {
    action("note_add", |session| {
        session
            .on_add_requested(title, content)
            .map_err(|err| err.to_string())
    })
}

/// Opens the edit surface; the returned item holds the pre-filled values.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit_open(note_id: String) -> NoteActionResponse {
    let result = parse_note_id(&note_id).and_then(|id| {
        with_session(|session| session.on_edit_requested(id).map_err(|err| err.to_string()))
    });
    match result {
        Ok(draft) => NoteActionResponse::applied(Some(draft_item(&draft)), "Editor opened."),
        Err(err) => NoteActionResponse::failure(format!("note_edit_open failed: {err}")),
    }
}

/// Saves an open edit surface.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit_save(note_id: String, title: String, content: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(err) => return NoteActionResponse::failure(format!("note_edit_save failed: {err}")),
    };
    action("note_edit_save", |session| {
        session
            .on_edit_confirmed(EditDraft {
                note_id: id,
                title,
                content,
            })
            .map_err(|err| err.to_string())
    })
}

/// Closes an edit surface without saving.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit_cancel(note_id: String) -> NoteActionResponse {
    let result = parse_note_id(&note_id)
        .and_then(|id| with_session(|session| Ok(session.on_edit_cancelled(id))));
    match result {
        Ok(true) => NoteActionResponse::applied(None, "Edit cancelled."),
        Ok(false) => NoteActionResponse::applied(None, "No editor was open."),
        Err(err) => NoteActionResponse::failure(format!("note_edit_cancel failed: {err}")),
    }
}

/// Deletes a note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(err) => return NoteActionResponse::failure(format!("note_delete failed: {err}")),
    };
    action("note_delete", |session| {
        session.on_delete_requested(id).map_err(|err| err.to_string())
    })
}

fn action(
    name: &str,
    f: impl FnOnce(&mut Session) -> Result<ViewChange, String>,
) -> NoteActionResponse {
    let result = with_session(|session| {
        let change = f(session)?;
        Ok((change, session.take_status()))
    });

    match result {
        Ok((change, status)) => {
            let (item, default_message) = match &change {
                ViewChange::Appended(block) => (Some(to_note_item(block)), "Note added."),
                ViewChange::Updated(block) => (Some(to_note_item(block)), "Note updated."),
                ViewChange::Removed(_) => (None, "Note deleted."),
            };
            if let Some(status) = status.as_deref() {
                log::warn!("event={name} module=ffi status=warn reason=persist_failed");
                return NoteActionResponse::applied(item, status);
            }
            NoteActionResponse::applied(item, default_message)
        }
        Err(err) => NoteActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, String> {
    let session = session()?;
    let mut guard = session
        .lock()
        .map_err(|_| "note session lock poisoned".to_string())?;
    f(&mut *guard)
}

fn session() -> Result<&'static Mutex<Session>, String> {
    if let Some(session) = SESSION.get() {
        return Ok(session);
    }
    let config = NotepadConfig::from_env(None)?;
    log::info!(
        "event=session_open module=ffi status=ok notes_file={}",
        config.notes_file.display()
    );
    Ok(SESSION.get_or_init(|| Mutex::new(open_presenter(&config))))
}

fn parse_note_id(raw: &str) -> Result<NoteId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid note id `{raw}`"))
}

fn to_note_item(block: &NoteBlock) -> NoteItem {
    NoteItem {
        note_id: block.note_id.to_string(),
        title: block.title.clone(),
        content: block.content.clone(),
    }
}

fn draft_item(draft: &EditDraft) -> NoteItem {
    NoteItem {
        note_id: draft.note_id.to_string(),
        title: draft.title.clone(),
        content: draft.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, note_add, note_delete, note_edit_cancel, note_edit_open,
        note_edit_save, notes_list, ping,
    };
    use std::sync::OnceLock;

    static NOTES_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

    fn use_temp_notes_file() {
        let dir = NOTES_DIR.get_or_init(|| tempfile::tempdir().expect("create temp dir"));
        std::env::set_var(
            notepad_core::config::NOTES_FILE_ENV,
            dir.path().join("Overview.txt"),
        );
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn add_edit_delete_flow_round_trips_through_ids() {
        use_temp_notes_file();

        let added = note_add("Groceries".to_string(), "milk".to_string());
        assert!(added.ok, "{}", added.message);
        let item = added.item.expect("add should return the new block");
        assert!(notes_list()
            .items
            .iter()
            .any(|listed| listed.note_id == item.note_id));

        let opened = note_edit_open(item.note_id.clone());
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.item.as_ref().map(|i| i.content.as_str()), Some("milk"));

        let saved = note_edit_save(
            item.note_id.clone(),
            "Groceries".to_string(),
            "milk, eggs".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.item.map(|i| i.content), Some("milk, eggs".to_string()));

        let deleted = note_delete(item.note_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!notes_list()
            .items
            .iter()
            .any(|listed| listed.note_id == item.note_id));
    }

    #[test]
    fn save_without_open_editor_fails() {
        use_temp_notes_file();
        let added = note_add("Draft".to_string(), "text".to_string());
        let note_id = added.item.expect("add should return the new block").note_id;

        let response = note_edit_save(note_id.clone(), "x".to_string(), "y".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("no open editor"));

        assert!(note_edit_open(note_id.clone()).ok);
        let cancelled = note_edit_cancel(note_id);
        assert!(cancelled.ok);
        assert_eq!(cancelled.message, "Edit cancelled.");
    }

    #[test]
    fn malformed_note_id_is_rejected() {
        let response = note_delete("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid note id"));
    }
}
