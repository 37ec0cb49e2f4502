//! Offline asset cache.
//!
//! The front end's static files are kept in a versioned cache so it can be
//! served without a network. The cache lives on disk as one directory per
//! version under `<data_dir>/cache/`:
//!
//! ```text
//! cache/
//!   nts-api-cache-v1/
//!     _root
//!     index.html
//!     icons/icon-192.png
//! ```
//!
//! Lookups are cache-first. A miss falls back to the [`AssetSource`] and is
//! not written back.

mod source;

pub use source::{AssetSource, HttpAssetSource};

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Name of the current cache version.
pub const CACHE_NAME: &str = "nts-api-cache-v1";

/// Assets stored on install.
pub const ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/style.css",
    "/script.js",
    "/manifest.json",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

/// File name used for the `/` asset.
const ROOT_FILE: &str = "_root";

/// Errors raised by the asset cache.
#[derive(Debug)]
pub enum CacheError {
    /// An asset could not be fetched.
    Fetch { path: String, reason: String },

    /// Reading or writing the cache directory failed.
    Io(std::io::Error),

    /// The asset is not in the current cache.
    NotCached(String),

    /// The asset path escapes the cache directory.
    InvalidPath(String),

    /// The base URL assets are fetched from is unusable.
    InvalidUrl(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Fetch { path, reason } => {
                write!(f, "Failed to fetch {}: {}", path, reason)
            }
            CacheError::Io(err) => write!(f, "Cache I/O error: {}", err),
            CacheError::NotCached(path) => write!(f, "Not cached: {}", path),
            CacheError::InvalidPath(path) => write!(f, "Invalid asset path: {}", path),
            CacheError::InvalidUrl(msg) => write!(f, "Invalid base URL: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(err)
    }
}

/// Where a fetched asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Cache,
    Network,
}

/// Versioned on-disk cache of static assets.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    name: String,
}

impl AssetCache {
    /// Cache under `root` using the current version name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_name(root, CACHE_NAME)
    }

    pub fn with_name(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the current version.
    pub fn version_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Fetches every asset and stores them in the current version.
    ///
    /// All assets are fetched before anything is written, so a single
    /// failure leaves the cache as it was.
    pub async fn install<S: AssetSource>(&self, source: &S) -> Result<usize, CacheError> {
        let mut fetched = Vec::with_capacity(ASSETS.len());
        for path in ASSETS {
            let file = self.asset_file(path)?;
            let bytes = source.fetch(path).await?;
            fetched.push((file, bytes));
        }

        for (file, bytes) in &fetched {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, bytes)?;
        }

        log::info!("Installed {} assets into {}", fetched.len(), self.name);
        Ok(fetched.len())
    }

    /// Deletes every cache version other than the current one.
    ///
    /// Returns the names deleted, sorted.
    pub fn activate(&self) -> Result<Vec<String>, CacheError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut deleted = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.name {
                continue;
            }

            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
            deleted.push(name);
        }

        deleted.sort();
        if !deleted.is_empty() {
            log::info!("Removed stale caches: {}", deleted.join(", "));
        }
        Ok(deleted)
    }

    /// Reads an asset from the current version only.
    pub fn get_cached(&self, path: &str) -> Result<Vec<u8>, CacheError> {
        let file = self.asset_file(path)?;
        if !file.is_file() {
            return Err(CacheError::NotCached(path.to_string()));
        }
        Ok(fs::read(file)?)
    }

    /// Cache-first lookup with a network fallback.
    pub async fn fetch<S: AssetSource>(
        &self,
        path: &str,
        source: &S,
    ) -> Result<(Vec<u8>, AssetOrigin), CacheError> {
        match self.get_cached(path) {
            Ok(bytes) => Ok((bytes, AssetOrigin::Cache)),
            Err(CacheError::NotCached(_)) => {
                log::debug!("Cache miss for {}", path);
                let bytes = source.fetch(path).await?;
                Ok((bytes, AssetOrigin::Network))
            }
            Err(e) => Err(e),
        }
    }

    fn asset_file(&self, path: &str) -> Result<PathBuf, CacheError> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(self.version_dir().join(ROOT_FILE));
        }

        let relative_path = Path::new(relative);
        let is_plain = relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(CacheError::InvalidPath(path.to_string()));
        }

        Ok(self.version_dir().join(relative_path))
    }
}
