//! Note repository contracts and flat-file implementation.
//!
//! # Responsibility
//! - Read and write the full note list against one backing medium.
//! - Keep file-system details out of the store.
//!
//! # Invariants
//! - `save_notes` replaces the whole backing file; there are no partial
//!   or append-only writes.
//! - The backing file is replaced via temp file + rename, never truncated
//!   in place.
//! - Bytes that are not valid UTF-8 are decoded lossily; the rest of the
//!   file still loads.
//! - A symlinked backing file is written through to its target.
//! - A missing backing file is reported as `RepoError::NotFound`, distinct
//!   from other I/O failures.

use crate::codec::line::{parse_notes, serialize_notes};
use crate::model::note::Note;
use log::{debug, error, warn};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = "tmp";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note file access.
#[derive(Debug)]
pub enum RepoError {
    /// Backing file does not exist yet.
    NotFound(PathBuf),
    /// Any other read/write failure.
    Io { path: PathBuf, source: io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "note file not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "note file I/O failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Repository interface for whole-list note persistence.
pub trait NoteRepository {
    /// Reads every note in stored order.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces stored notes with `notes`, preserving order.
    fn save_notes(&self, notes: &[Note]) -> RepoResult<()>;
    /// Human-readable location used in diagnostics.
    fn location(&self) -> String;
}

/// Flat-file repository: one note per line.
#[derive(Debug, Clone)]
pub struct FlatFileNoteRepository {
    path: PathBuf,
}

impl FlatFileNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_replace(&self, body: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let target = self.write_target()?;
        let temp_path = temp_path_for(&target);
        let result = write_then_rename(&temp_path, &target, body);
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Resolves symlinks so the rename replaces the link target, not the link.
    fn write_target(&self) -> io::Result<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(resolved) => Ok(resolved),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(err) => Err(err),
        }
    }
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|value| value.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    target.with_file_name(name)
}

fn write_then_rename(temp_path: &Path, target: &Path, body: &str) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(body.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, target)
}

impl NoteRepository for FlatFileNoteRepository {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(RepoError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let body = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(decoded) = &body {
            let damaged = decoded
                .lines()
                .filter(|line| line.contains(char::REPLACEMENT_CHARACTER))
                .count();
            warn!(
                "event=notes_read module=repo status=warn reason=invalid_utf8 damaged_lines={}",
                damaged
            );
        }

        let notes = parse_notes(&body);
        debug!(
            "event=notes_read module=repo status=ok count={} bytes={}",
            notes.len(),
            body.len()
        );
        Ok(notes)
    }

    fn save_notes(&self, notes: &[Note]) -> RepoResult<()> {
        let started_at = Instant::now();
        let body = serialize_notes(notes);

        match self.write_replace(&body) {
            Ok(()) => {
                debug!(
                    "event=notes_write module=repo status=ok count={} bytes={} duration_ms={}",
                    notes.len(),
                    body.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=notes_write module=repo status=error duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
