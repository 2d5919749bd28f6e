use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised by cache persistence.
///
/// These never reach scoring callers; the cache logs them and carries on.
pub enum CacheError {
    /// I/O error reading or writing the snapshot.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be serialized.
    #[error("failed to serialize cache snapshot: {reason}")]
    Serialization {
        /// Error message.
        reason: String,
    },

    /// Snapshot bytes failed validation.
    #[error("corrupt cache snapshot at {path}: {reason}")]
    Corrupt {
        /// Snapshot path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },

    /// Snapshot was written by an incompatible version or encoder.
    #[error("incompatible cache snapshot at {path}: {reason}")]
    Incompatible {
        /// Snapshot path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for cache persistence.
pub type CacheResult<T> = Result<T, CacheError>;
