//! Offline asset cache.
//!
//! # Responsibility
//! - Precache the fixed app-shell asset list from an origin.
//! - Serve assets cache-first, falling back to the origin only on a miss.
//! - Evict stale cache generations when a new one is activated.
//!
//! # Invariants
//! - Install is all-or-nothing: every asset is fetched before anything
//!   is persisted.
//! - A cached entry is always served without consulting the origin.
//! - Activation removes every generation except the active one.

pub mod asset_cache;
pub mod origin;

pub use asset_cache::{AssetCache, CacheError, FetchOutcome, FetchSource, APP_SHELL, CACHE_NAME};
pub use origin::{AssetOrigin, DirOrigin, OriginError};
