//! Content-addressed embedding cache in front of a [`TextEncoder`].
//!
//! Keys are 128-bit BLAKE3 hashes of the text ([`hash_text`]). Misses are
//! encoded in a single batch call. When a snapshot path is configured the full
//! map is rewritten after every batch that added entries.
//!
//! # Concurrency
//!
//! The map sits behind an `RwLock`; snapshot writes are serialized by a separate
//! mutex. Two requests missing on the same text may both call the encoder and
//! the later insert wins. That only costs a redundant encoder call.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::config::CacheConfig;
use super::error::CacheResult;
use super::snapshot::{CacheSnapshot, SnapshotEntry, SnapshotStore};
use crate::embedding::{EmbeddingError, EncoderMode, TextEncoder};
use crate::hashing::{TextHash, hash_text, to_hex};

pub struct EmbeddingCache {
    encoder: Arc<dyn TextEncoder>,
    entries: RwLock<HashMap<TextHash, Vec<f32>>>,
    store: Option<SnapshotStore>,
    persist_lock: Mutex<()>,
}

impl std::fmt::Debug for EmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("encoder", &self.encoder.identity())
            .field("embedding_dim", &self.encoder.embedding_dim())
            .field("entries", &self.len())
            .field("path", &self.path())
            .finish()
    }
}

impl EmbeddingCache {
    /// Creates a cache, loading any persisted snapshot.
    ///
    /// A missing snapshot starts empty. An unreadable, corrupt or incompatible
    /// snapshot is logged and also starts empty.
    pub fn new(encoder: Arc<dyn TextEncoder>, config: CacheConfig) -> Self {
        let store = config.path.map(SnapshotStore::new);
        let cache = Self {
            encoder,
            entries: RwLock::new(HashMap::new()),
            store,
            persist_lock: Mutex::new(()),
        };

        if let Some(store) = &cache.store {
            match cache.load_snapshot(store) {
                Ok(0) => debug!(path = %store.path().display(), "No cached embeddings loaded"),
                Ok(count) => info!(
                    path = %store.path().display(),
                    entries = count,
                    "Loaded cached embeddings"
                ),
                Err(e) => {
                    warn!(error = %e, "Failed to load embedding cache, starting empty");
                    cache.entries.write().clear();
                }
            }
        }

        cache
    }

    /// Creates a cache with no persistence.
    pub fn in_memory(encoder: Arc<dyn TextEncoder>) -> Self {
        Self::new(encoder, CacheConfig::in_memory())
    }

    fn load_snapshot(&self, store: &SnapshotStore) -> CacheResult<usize> {
        let Some(snapshot) = store.load()? else {
            return Ok(0);
        };

        snapshot.check_compatible(
            store.path(),
            &self.encoder.identity(),
            self.encoder.embedding_dim(),
        )?;

        let mut entries = self.entries.write();
        entries.extend(snapshot.entries.into_iter().map(|e| (e.key, e.vector)));
        Ok(entries.len())
    }

    /// Encodes one text. See [`encode_batch`](Self::encode_batch).
    pub fn encode(&self, text: &str, use_cache: bool) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.encode_batch(&[text], use_cache)?;
        vectors.pop().ok_or(EmbeddingError::BatchSizeMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Encodes `texts`, returning one vector per text in input order.
    ///
    /// With `use_cache`, hits are served from memory and fresh vectors are
    /// stored. Without it the cache is neither read nor written. Uncached texts
    /// go to the encoder in one call, with duplicates sent once.
    pub fn encode_batch(
        &self,
        texts: &[&str],
        use_cache: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let keys: Vec<TextHash> = texts.iter().map(|t| hash_text(t)).collect();
        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];

        if use_cache {
            let entries = self.entries.read();
            for (slot, key) in results.iter_mut().zip(&keys) {
                *slot = entries.get(key).cloned();
            }
        }

        let mut seen: HashSet<TextHash> = HashSet::new();
        let mut pending_keys: Vec<TextHash> = Vec::new();
        let mut pending_texts: Vec<&str> = Vec::new();
        for ((slot, key), text) in results.iter().zip(&keys).zip(texts) {
            if slot.is_none() && seen.insert(*key) {
                pending_keys.push(*key);
                pending_texts.push(*text);
            }
        }

        let hits = texts.len() - results.iter().filter(|r| r.is_none()).count();
        debug!(
            batch = texts.len(),
            hits,
            to_encode = pending_texts.len(),
            use_cache,
            "Embedding cache lookup"
        );

        if !pending_texts.is_empty() {
            let vectors = self.encoder.encode_batch(&pending_texts)?;
            if vectors.len() != pending_texts.len() {
                return Err(EmbeddingError::BatchSizeMismatch {
                    expected: pending_texts.len(),
                    actual: vectors.len(),
                });
            }

            let fresh: HashMap<TextHash, Vec<f32>> =
                pending_keys.into_iter().zip(vectors).collect();

            for (slot, key) in results.iter_mut().zip(&keys) {
                if slot.is_none() {
                    *slot = fresh.get(key).cloned();
                }
            }

            if use_cache {
                self.entries.write().extend(fresh);
                self.persist_logged();
            }
        }

        results
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(EmbeddingError::BatchSizeMismatch {
                expected: texts.len(),
                actual: 0,
            })
    }

    fn persist_logged(&self) {
        match self.persist() {
            Ok(Some(bytes)) => debug!(bytes, entries = self.len(), "Persisted embedding cache"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to persist embedding cache"),
        }
    }

    /// Writes the full cache to its snapshot file.
    ///
    /// Returns `Ok(None)` when persistence is disabled.
    pub fn persist(&self) -> CacheResult<Option<usize>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };

        let _guard = self.persist_lock.lock();
        let snapshot = self.snapshot();
        store.save(&snapshot).map(Some)
    }

    /// Copies the current contents into a [`CacheSnapshot`].
    pub fn snapshot(&self) -> CacheSnapshot {
        let entries = self
            .entries
            .read()
            .iter()
            .map(|(key, vector)| SnapshotEntry {
                key: *key,
                vector: vector.clone(),
            })
            .collect();

        CacheSnapshot::new(
            &self.encoder.identity(),
            self.encoder.embedding_dim(),
            entries,
        )
    }

    /// Returns the cached vector for `text` without encoding.
    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.entries.read().get(&hash_text(text)).cloned()
    }

    /// Returns `true` if `text` is cached.
    pub fn contains(&self, text: &str) -> bool {
        let key = hash_text(text);
        let found = self.entries.read().contains_key(&key);
        debug!(key = %to_hex(&key), found, "Embedding cache lookup");
        found
    }

    /// Number of cached vectors.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops all in-memory entries (the snapshot file is left alone).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot path, if persistence is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.store.as_ref().map(SnapshotStore::path)
    }

    /// Backend kind of the wrapped encoder.
    pub fn encoder_mode(&self) -> EncoderMode {
        self.encoder.mode()
    }

    /// Output dimension of the wrapped encoder.
    pub fn embedding_dim(&self) -> usize {
        self.encoder.embedding_dim()
    }
}
