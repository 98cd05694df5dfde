//! Asset origin seam.
//!
//! The origin stands in for wherever the app shell is served from. The
//! cache only ever talks to it through [`AssetOrigin`], so tests and the
//! CLI can swap in directories or canned/unreachable origins.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub type OriginResult<T> = Result<T, OriginError>;

#[derive(Debug)]
pub enum OriginError {
    /// The origin is reachable but has no asset at this path.
    NotFound(String),
    /// The origin cannot be reached at all.
    Unavailable(String),
}

impl Display for OriginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "asset not found at origin: {path}"),
            Self::Unavailable(reason) => write!(f, "origin unavailable: {reason}"),
        }
    }
}

impl Error for OriginError {}

/// Source of truth for app-shell assets.
pub trait AssetOrigin {
    /// Fetches one asset by request path (`/`, `/style.css`, ...).
    fn fetch(&self, path: &str) -> OriginResult<Vec<u8>>;
}

/// Origin backed by a directory of static assets.
pub struct DirOrigin {
    root: PathBuf,
}

impl DirOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetOrigin for DirOrigin {
    fn fetch(&self, path: &str) -> OriginResult<Vec<u8>> {
        let relative =
            resolve_asset_path(path).ok_or_else(|| OriginError::NotFound(path.to_string()))?;
        match fs::read(self.root.join(relative)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(OriginError::NotFound(path.to_string()))
            }
            Err(err) => Err(OriginError::Unavailable(err.to_string())),
        }
    }
}

/// Maps a request path to a path relative to the origin root. The bare
/// document path serves `index.html`. Parent traversal is refused.
fn resolve_asset_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.split('/').any(|segment| segment == "..") {
        return None;
    }
    if trimmed.is_empty() {
        return Some("index.html");
    }
    Some(trimmed)
}
