//! Deterministic offline encoder.
//!
//! Vectors are derived from a hash of the text, so identical text always maps to
//! the same unit vector and unrelated texts land near-orthogonal. There is no
//! semantic signal; this exists so the pipeline runs without model files.

use tracing::{debug, warn};

use super::encoder::{EncoderMode, TextEncoder, normalize};
use super::error::EmbeddingError;
use crate::hashing::seed_for;

const SEED_LABEL: &str = "offline-encoder";

#[derive(Debug, Clone)]
pub struct OfflineEncoder {
    embedding_dim: usize,
}

impl OfflineEncoder {
    pub fn new(embedding_dim: usize) -> Result<Self, EmbeddingError> {
        if embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }
        warn!(
            embedding_dim,
            "Encoder running in OFFLINE mode (deterministic, no semantic signal)"
        );
        Ok(Self { embedding_dim })
    }

    /// Produces the pseudo-embedding for one text.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        pseudo_embedding(seed_for(SEED_LABEL, text), self.embedding_dim)
    }
}

impl TextEncoder for OfflineEncoder {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        debug!(batch = texts.len(), "Generating offline embeddings");
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn mode(&self) -> EncoderMode {
        EncoderMode::Offline
    }

    fn identity(&self) -> String {
        format!("offline:{}", self.embedding_dim)
    }
}

/// Expands `seed` into a unit vector of length `dim` (64-bit LCG, values in [-1, 1)).
pub(crate) fn pseudo_embedding(seed: u64, dim: usize) -> Vec<f32> {
    let mut state = seed;
    let mut embedding = Vec::with_capacity(dim);

    for _ in 0..dim {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
        embedding.push(value);
    }

    normalize(&mut embedding);
    embedding
}
