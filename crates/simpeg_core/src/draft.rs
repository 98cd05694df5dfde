//! Draft persistence for unsaved form input.
//!
//! # Responsibility
//! - Keep the latest unsaved form state on disk so an interrupted entry
//!   session can be resumed.
//!
//! # Invariants
//! - Only forms with typed content are ever written; an empty form never
//!   overwrites a saved draft.
//! - A corrupt draft file is treated as no draft, never as an error.
//! - Clearing is idempotent; a missing file is fine.

use crate::form::EmployeeForm;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Debug)]
pub enum DraftError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "draft storage failure: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode draft: {err}"),
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DraftError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DraftError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// File-backed draft store holding at most one draft.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves the form as the current draft. Forms without typed content
    /// are skipped; returns whether a draft was written.
    pub fn save(&self, form: &EmployeeForm) -> DraftResult<bool> {
        if !form.has_content() {
            return Ok(false);
        }

        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(form)?;
        fs::write(&self.path, contents)?;
        Ok(true)
    }

    /// Loads the saved draft, if any. A file that cannot be decoded is
    /// logged and reported as no draft.
    pub fn load(&self) -> DraftResult<Option<EmployeeForm>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(form) => Ok(Some(form)),
            Err(err) => {
                warn!(
                    "event=draft_load module=draft status=corrupt path={} error={}",
                    self.path.display(),
                    err
                );
                Ok(None)
            }
        }
    }

    /// Removes the saved draft. Succeeds when no draft exists.
    pub fn clear(&self) -> DraftResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
