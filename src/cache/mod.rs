//! Embedding cache: hash-keyed vectors in memory, persisted as one snapshot file.

pub mod config;
pub mod embedding_cache;
pub mod error;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use config::CacheConfig;
pub use embedding_cache::EmbeddingCache;
pub use error::{CacheError, CacheResult};
pub use snapshot::{CacheSnapshot, SnapshotEntry, SnapshotStore};
