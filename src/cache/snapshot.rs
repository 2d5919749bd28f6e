//! On-disk snapshot of the embedding cache.
//!
//! The whole map is written as one rkyv archive. Writes go to a temp file in the
//! target directory and are renamed into place, so readers see either the old or
//! the new snapshot, never a torn one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rkyv::rancor::Error as RkyvError;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize, from_bytes, to_bytes};
use tempfile::NamedTempFile;

use super::error::{CacheError, CacheResult};
use crate::constants::CACHE_SNAPSHOT_VERSION;
use crate::hashing::TextHash;

/// One cached vector.
#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct SnapshotEntry {
    /// Text hash.
    pub key: TextHash,
    /// Embedding vector.
    pub vector: Vec<f32>,
}

/// Persisted cache contents.
#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct CacheSnapshot {
    /// Layout version.
    pub version: u32,
    /// Identity of the encoder the vectors came from.
    pub encoder_id: String,
    /// Vector length.
    pub embedding_dim: u32,
    /// Cached entries.
    pub entries: Vec<SnapshotEntry>,
}

impl CacheSnapshot {
    /// Creates a snapshot at the current layout version.
    pub fn new(encoder_id: &str, embedding_dim: usize, entries: Vec<SnapshotEntry>) -> Self {
        Self {
            version: CACHE_SNAPSHOT_VERSION,
            encoder_id: encoder_id.to_string(),
            embedding_dim: embedding_dim as u32,
            entries,
        }
    }

    /// Checks the snapshot was produced by a compatible writer and encoder.
    pub fn check_compatible(
        &self,
        path: &Path,
        encoder_id: &str,
        embedding_dim: usize,
    ) -> CacheResult<()> {
        let incompatible = |reason: String| CacheError::Incompatible {
            path: path.to_path_buf(),
            reason,
        };

        if self.version != CACHE_SNAPSHOT_VERSION {
            return Err(incompatible(format!(
                "version {} (expected {})",
                self.version, CACHE_SNAPSHOT_VERSION
            )));
        }
        if self.encoder_id != encoder_id {
            return Err(incompatible(format!(
                "encoder '{}' (expected '{}')",
                self.encoder_id, encoder_id
            )));
        }
        if self.embedding_dim as usize != embedding_dim {
            return Err(incompatible(format!(
                "embedding dim {} (expected {})",
                self.embedding_dim, embedding_dim
            )));
        }
        if let Some(bad) = self.entries.iter().find(|e| e.vector.len() != embedding_dim) {
            return Err(incompatible(format!(
                "entry with {} floats (expected {})",
                bad.vector.len(),
                embedding_dim
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Reads and writes a [`CacheSnapshot`] at a fixed path.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot; `Ok(None)` if no file exists yet.
    pub fn load(&self) -> CacheResult<Option<CacheSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut aligned = AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(&bytes);

        let snapshot =
            from_bytes::<CacheSnapshot, RkyvError>(&aligned).map_err(|e| CacheError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Some(snapshot))
    }

    /// Atomically replaces the snapshot file; returns bytes written.
    pub fn save(&self, snapshot: &CacheSnapshot) -> CacheResult<usize> {
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        let bytes = to_bytes::<RkyvError>(snapshot).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(io_err)?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        temp.write_all(&bytes).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| io_err(e.error))?;

        Ok(bytes.len())
    }
}
