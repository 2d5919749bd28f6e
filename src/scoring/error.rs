use thiserror::Error;

use crate::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::rubric::RubricError;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// The scorer was never initialised (rubric or encoder unavailable).
    #[error("scorer not initialized")]
    NotReady,

    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("invalid signal weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("rubric error: {0}")]
    Rubric(#[from] RubricError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
