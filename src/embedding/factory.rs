use std::sync::Arc;

use super::bert::BertEncoder;
use super::config::EncoderConfig;
use super::encoder::{EncoderMode, TextEncoder};
use super::error::EmbeddingError;
use super::offline::OfflineEncoder;

/// Builds the [`TextEncoder`] selected by `config.mode`.
///
/// Model mode never falls back to the offline encoder: a missing or broken model
/// is an error.
pub fn build_encoder(config: &EncoderConfig) -> Result<Arc<dyn TextEncoder>, EmbeddingError> {
    config.validate()?;
    match config.mode {
        EncoderMode::Model => Ok(Arc::new(BertEncoder::load(config)?)),
        EncoderMode::Offline => Ok(Arc::new(OfflineEncoder::new(config.embedding_dim)?)),
    }
}
