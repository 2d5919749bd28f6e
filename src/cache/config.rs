use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CACHE_FILENAME;

#[derive(Debug, Clone, Default)]
/// Embedding cache configuration.
pub struct CacheConfig {
    /// Snapshot file. `None` keeps the cache in memory only.
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    /// Persists to `DEFAULT_CACHE_FILENAME` inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: Some(dir.as_ref().join(DEFAULT_CACHE_FILENAME)),
        }
    }

    /// Persists to an explicit file path.
    pub fn at_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// No persistence.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// Returns `true` if a snapshot path is configured.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }
}
