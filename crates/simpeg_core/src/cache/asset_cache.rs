//! Generation-based asset cache with cache-first fetch.

use crate::cache::origin::{AssetOrigin, OriginError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Versioned name of the active cache generation. Bumping the version
/// makes the next activation sweep away every older generation.
pub const CACHE_NAME: &str = "simpeg-shell-v1.0.1";

/// Fixed app-shell asset list precached on install.
pub const APP_SHELL: [&str; 8] = [
    "/",
    "/index.html",
    "/style.css",
    "/script.js",
    "/manifest.webmanifest",
    "/assets/icon.svg",
    "/assets/icon-192.png",
    "/assets/icon-512.png",
];

const META_SUFFIX: &str = ".meta.json";

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug)]
pub enum CacheError {
    /// Cache storage failure.
    Io(std::io::Error),
    /// Entry metadata failed to encode.
    Meta(serde_json::Error),
    /// Install aborted because an asset could not be fetched.
    Install(OriginError),
    /// The origin has no such asset and the cache holds nothing for it.
    NotFound(String),
    /// The origin is unreachable and no cached fallback applies.
    Offline(String),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cache storage failure: {err}"),
            Self::Meta(err) => write!(f, "cache metadata failure: {err}"),
            Self::Install(err) => write!(f, "cache install aborted: {err}"),
            Self::NotFound(path) => write!(f, "asset not found: {path}"),
            Self::Offline(path) => write!(f, "offline and not cached: {path}"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Meta(err) => Some(err),
            Self::Install(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Offline(_) => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(value: serde_json::Error) -> Self {
        Self::Meta(value)
    }
}

/// Sidecar metadata stored next to each cached entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// Request path the entry was cached under.
    pub path: String,
    pub cached_at: DateTime<Utc>,
}

/// Which source produced the bytes of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Served from the cache without consulting the origin.
    Cache,
    /// Cache miss served by the origin (and cached opportunistically).
    Origin,
    /// Origin unreachable; served the cached document entry instead.
    Fallback,
}

/// Result of a cache-first fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub body: Vec<u8>,
    pub source: FetchSource,
}

/// Asset cache rooted at a directory of cache generations.
///
/// Each generation is one subdirectory named after its versioned cache
/// name. Entries are content files keyed by the SHA-256 hex of the
/// request path, each with a JSON metadata sidecar.
pub struct AssetCache {
    root: PathBuf,
    name: String,
}

impl AssetCache {
    /// Creates a handle on the generation `name` under `root`. Nothing
    /// is touched on disk until entries are written.
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    /// Active generation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding this generation's entries.
    pub fn generation_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Precaches `paths` from the origin. Every asset is fetched before
    /// anything is persisted, so a failed fetch aborts the install with
    /// no partial cache. Returns the number of installed entries.
    pub fn install(&self, origin: &dyn AssetOrigin, paths: &[&str]) -> CacheResult<usize> {
        let mut fetched: Vec<(&str, Vec<u8>)> = Vec::with_capacity(paths.len());
        for path in paths {
            let body = origin.fetch(path).map_err(CacheError::Install)?;
            fetched.push((path, body));
        }

        for (path, body) in &fetched {
            self.store(path, body)?;
        }

        info!(
            "event=cache_install module=cache status=ok name={} assets={}",
            self.name,
            fetched.len()
        );
        Ok(fetched.len())
    }

    /// Sweeps stale generations: every sibling directory under the root
    /// whose name differs from the active generation is removed. Returns
    /// the evicted generation names.
    pub fn activate(&self) -> CacheResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut evicted = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().to_string();
            if dir_name == self.name {
                continue;
            }
            fs::remove_dir_all(entry.path())?;
            evicted.push(dir_name);
        }
        evicted.sort();

        info!(
            "event=cache_activate module=cache status=ok name={} evicted={}",
            self.name,
            evicted.len()
        );
        Ok(evicted)
    }

    /// Serves one asset cache-first.
    ///
    /// A cached entry wins outright. On a miss the origin is consulted
    /// and a successful body is cached before being returned. An origin
    /// `NotFound` propagates without being cached. When the origin is
    /// unreachable, document-like paths fall back to the cached `/`
    /// entry; everything else reports offline.
    pub fn fetch(&self, origin: &dyn AssetOrigin, path: &str) -> CacheResult<FetchOutcome> {
        if let Some(body) = self.lookup(path)? {
            return Ok(FetchOutcome {
                body,
                source: FetchSource::Cache,
            });
        }

        match origin.fetch(path) {
            Ok(body) => {
                if let Err(err) = self.store(path, &body) {
                    warn!(
                        "event=cache_store module=cache status=error path={path} error={err}"
                    );
                }
                Ok(FetchOutcome {
                    body,
                    source: FetchSource::Origin,
                })
            }
            Err(OriginError::NotFound(path)) => Err(CacheError::NotFound(path)),
            Err(OriginError::Unavailable(reason)) => {
                if is_document_path(path) {
                    if let Some(body) = self.lookup("/")? {
                        return Ok(FetchOutcome {
                            body,
                            source: FetchSource::Fallback,
                        });
                    }
                }
                warn!(
                    "event=cache_fetch module=cache status=offline path={path} error={reason}"
                );
                Err(CacheError::Offline(path.to_string()))
            }
        }
    }

    /// Reads a cached entry body, if present.
    pub fn lookup(&self, path: &str) -> CacheResult<Option<Vec<u8>>> {
        match fs::read(self.entry_path(path)) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes one entry (content plus metadata sidecar) into the active
    /// generation.
    pub fn store(&self, path: &str, body: &[u8]) -> CacheResult<()> {
        fs::create_dir_all(self.generation_dir())?;
        fs::write(self.entry_path(path), body)?;

        let meta = EntryMeta {
            path: path.to_string(),
            cached_at: Utc::now(),
        };
        fs::write(self.meta_path(path), serde_json::to_string_pretty(&meta)?)?;
        Ok(())
    }

    /// Lists entry metadata for the active generation, sorted by path.
    /// Entries whose sidecar cannot be decoded are logged and skipped.
    pub fn entries(&self) -> CacheResult<Vec<EntryMeta>> {
        let dir_entries = match fs::read_dir(self.generation_dir()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut metas = Vec::new();
        for entry in dir_entries {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !file_name.ends_with(META_SUFFIX) {
                continue;
            }

            let contents = fs::read_to_string(entry.path())?;
            match serde_json::from_str::<EntryMeta>(&contents) {
                Ok(meta) => metas.push(meta),
                Err(err) => {
                    warn!(
                        "event=cache_meta module=cache status=corrupt file={file_name} error={err}"
                    );
                }
            }
        }
        metas.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(metas)
    }

    fn entry_path(&self, path: &str) -> PathBuf {
        self.generation_dir().join(entry_key(path))
    }

    fn meta_path(&self, path: &str) -> PathBuf {
        self.generation_dir()
            .join(format!("{}{META_SUFFIX}", entry_key(path)))
    }
}

/// Stable entry file name for a request path.
fn entry_key(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether a request path is document-like and may fall back to the
/// cached `/` entry when the origin is unreachable.
fn is_document_path(path: &str) -> bool {
    if path == "/" || path.is_empty() {
        return true;
    }
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    last_segment.ends_with(".html") || !last_segment.contains('.')
}

#[cfg(test)]
mod tests {
    use super::{entry_key, is_document_path};

    #[test]
    fn entry_keys_are_stable_and_distinct() {
        assert_eq!(entry_key("/"), entry_key("/"));
        assert_ne!(entry_key("/"), entry_key("/index.html"));
        assert_eq!(entry_key("/style.css").len(), 64);
    }

    #[test]
    fn document_paths_are_recognized() {
        assert!(is_document_path("/"));
        assert!(is_document_path("/index.html"));
        assert!(is_document_path("/laporan"));
        assert!(!is_document_path("/style.css"));
        assert!(!is_document_path("/assets/icon-192.png"));
    }
}
