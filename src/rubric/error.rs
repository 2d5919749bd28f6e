use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
/// Errors loading, validating or embedding a rubric.
pub enum RubricError {
    /// Rubric file does not exist.
    #[error("rubric file not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Rubric file could not be read.
    #[error("failed to read rubric file {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Rubric file is not valid JSON for a list of criteria.
    #[error("failed to parse rubric file {path}: {reason}")]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Rubric has no criteria.
    #[error("rubric has no criteria")]
    Empty,

    /// A criterion failed validation.
    #[error("invalid criterion '{criterion}': {reason}")]
    InvalidCriterion {
        /// Criterion name.
        criterion: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Description embeddings could not be computed.
    #[error("failed to embed rubric descriptions: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Convenience result alias.
pub type RubricResult<T> = Result<T, RubricError>;
