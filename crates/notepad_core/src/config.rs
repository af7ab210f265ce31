//! Runtime configuration for shells.
//!
//! # Responsibility
//! - Resolve the backing file path and logging settings.
//!
//! # Invariants
//! - Precedence is explicit value, then environment, then default.
//! - Blank values count as unset.

use crate::logging::{default_log_level, LogLevel};
use std::path::PathBuf;

pub const NOTES_FILE_ENV: &str = "NOTEPAD_FILE";
pub const LOG_LEVEL_ENV: &str = "NOTEPAD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTEPAD_LOG_DIR";
pub const DEFAULT_NOTES_FILE: &str = "Overview.txt";

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotepadConfig {
    /// Flat file holding one note per line.
    pub notes_file: PathBuf,
    pub log_level: LogLevel,
    /// Absolute log directory; `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl NotepadConfig {
    /// Resolves settings from the process environment.
    ///
    /// # Errors
    /// - `NOTEPAD_LOG_LEVEL` is set to an unsupported level.
    pub fn from_env(notes_file: Option<PathBuf>) -> Result<Self, String> {
        Self::resolve(notes_file, |key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which stands in for the environment.
    pub fn resolve(
        notes_file: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let notes_file = notes_file
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| non_blank(NOTES_FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_FILE));

        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => LogLevel::parse(&raw)?,
            None => default_log_level(),
        };

        Ok(Self {
            notes_file,
            log_level,
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        })
    }
}
