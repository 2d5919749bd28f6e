use std::path::{Path, PathBuf};

use super::encoder::EncoderMode;
use super::error::EmbeddingError;
use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};

/// Files expected inside a sentence-transformer model directory.
pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
pub const MODEL_TOKENIZER_FILE: &str = "tokenizer.json";

#[derive(Debug, Clone)]
/// Configuration for building a [`TextEncoder`](super::TextEncoder).
pub struct EncoderConfig {
    /// Backend selection.
    pub mode: EncoderMode,
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_path: PathBuf,
    /// Max tokens per text.
    pub max_seq_len: usize,
    /// Output dimension (offline mode; the model reports its own).
    pub embedding_dim: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            mode: EncoderMode::Model,
            model_path: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EncoderConfig {
    /// Creates a model-backed config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Creates an offline config (no model files; deterministic embeddings).
    pub fn offline() -> Self {
        Self {
            mode: EncoderMode::Offline,
            ..Default::default()
        }
    }

    /// Overrides the offline output dimension.
    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates required fields for the selected mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        if self.mode == EncoderMode::Offline {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required in model mode".to_string(),
            });
        }

        if !self.model_path.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        for file in [MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE, MODEL_TOKENIZER_FILE] {
            let path = self.model_path.join(file);
            if !path.exists() {
                return Err(EmbeddingError::ModelNotFound { path });
            }
        }

        Ok(())
    }

    /// Path to the model's `config.json`.
    pub fn config_file(&self) -> PathBuf {
        self.model_path.join(MODEL_CONFIG_FILE)
    }

    /// Path to the model weights.
    pub fn weights_file(&self) -> PathBuf {
        self.model_path.join(MODEL_WEIGHTS_FILE)
    }

    /// Model directory.
    pub fn model_dir(&self) -> &Path {
        &self.model_path
    }
}
