use super::error::EmbeddingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which kind of encoder backs the embedding cache.
pub enum EncoderMode {
    #[default]
    /// Real sentence-embedding model.
    Model,
    /// Deterministic hash-derived vectors (no model files).
    Offline,
}

impl EncoderMode {
    /// Short label used in logs and the health endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderMode::Model => "model",
            EncoderMode::Offline => "offline",
        }
    }
}

impl std::fmt::Display for EncoderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EncoderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model" | "real" => Ok(Self::Model),
            "offline" | "stub" => Ok(Self::Offline),
            other => Err(format!("unknown encoder mode: {}", other)),
        }
    }
}

/// Text → fixed-length vector capability.
///
/// Implementations must be deterministic for identical input text and return
/// exactly one vector of [`embedding_dim`](TextEncoder::embedding_dim) floats per
/// input, in input order.
pub trait TextEncoder: Send + Sync {
    /// Encodes a batch of texts in one model invocation.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Output vector length.
    fn embedding_dim(&self) -> usize;

    /// Backend kind.
    fn mode(&self) -> EncoderMode;

    /// Stable label of the model producing the vectors.
    ///
    /// Two encoders with equal identities must produce equal vectors for equal
    /// text. Persisted caches are only reused under the same identity.
    fn identity(&self) -> String;
}

/// L2-normalises `v` in place (zero vectors are left untouched).
pub(crate) fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
