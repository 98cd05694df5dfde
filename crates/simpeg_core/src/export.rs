//! JSON export of the employee registry.
//!
//! # Responsibility
//! - Render the full registry as a pretty-printed JSON array in the
//!   record wire shape.
//! - Write the document to a file for the user to keep or share.
//!
//! # Invariants
//! - Records are exported in store order (id ascending) regardless of
//!   how any list view sorts them.

use crate::model::employee::Employee;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

/// Default export file name offered to the user.
pub const DEFAULT_EXPORT_FILE: &str = "data-karyawan.json";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to encode export document: {err}"),
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Renders the export document without touching the filesystem.
pub fn export_to_string(employees: &[Employee]) -> ExportResult<String> {
    let mut ordered: Vec<&Employee> = employees.iter().collect();
    ordered.sort_by_key(|employee| employee.id);
    Ok(serde_json::to_string_pretty(&ordered)?)
}

/// Writes the export document to `path`, creating parent directories as
/// needed. Returns the number of exported records.
pub fn export_to_path(employees: &[Employee], path: &Path) -> ExportResult<usize> {
    let document = export_to_string(employees)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;

    info!(
        "event=export module=export status=ok count={} path={}",
        employees.len(),
        path.display()
    );
    Ok(employees.len())
}
