//! Sentence-transformer BERT encoder (safetensors + tokenizer, mean pooling).

use candle::{DType, Device, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::config::EncoderConfig;
use super::device::select_device;
use super::encoder::{EncoderMode, TextEncoder, normalize};
use super::error::EmbeddingError;
use super::utils::load_batch_tokenizer;
use crate::hashing::{TEXT_HASH_BYTES, to_hex};

pub struct BertEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    embedding_dim: usize,
    identity: String,
}

impl std::fmt::Debug for BertEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("embedding_dim", &self.embedding_dim)
            .field("identity", &self.identity)
            .finish()
    }
}

impl BertEncoder {
    /// Loads the model directory named by `config`.
    pub fn load(config: &EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for encoder");

        let config_content = std::fs::read_to_string(config.config_file())?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse config.json: {}", e),
            })?;

        // SAFETY: the weights file is opened read-only and not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_file()], DType::F32, &device)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to map weights: {}", e),
        })?;

        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb, &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load BERT model: {}", e),
        })?;

        let tokenizer = load_batch_tokenizer(config.model_dir(), config.max_seq_len).map_err(
            |e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        let embedding_dim = bert_config.hidden_size;
        let identity = model_identity(config, &config_content)?;

        info!(
            model_path = %config.model_dir().display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            identity = %identity,
            "Sentence encoder loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            embedding_dim,
            identity,
        })
    }

    fn forward_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let batch = encodings.len();
        let seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0);
        if seq_len == 0 {
            return Ok(vec![vec![0.0; self.embedding_dim]; batch]);
        }

        let mut ids = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        let mut mask = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
        }

        debug!(batch, seq_len, "Running encoder forward pass");

        let input_ids = Tensor::from_vec(ids, (batch, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (batch, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, seq_len), &self.device)?;

        // [batch, seq_len, hidden]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        // Mean pooling over non-padding tokens.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        let mut vectors = pooled.to_vec2::<f32>()?;
        for v in &mut vectors {
            normalize(v);
        }
        Ok(vectors)
    }
}

impl TextEncoder for BertEncoder {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        self.forward_batch(texts)
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn mode(&self) -> EncoderMode {
        EncoderMode::Model
    }

    fn identity(&self) -> String {
        self.identity.clone()
    }
}

/// `bert:<hash>` over the model config, weights path and weights size.
fn model_identity(config: &EncoderConfig, config_content: &str) -> Result<String, EmbeddingError> {
    let weights = config.weights_file();
    let weights_len = std::fs::metadata(&weights)?.len();

    let mut hasher = blake3::Hasher::new();
    hasher.update(config_content.as_bytes());
    hasher.update(b"|");
    hasher.update(weights.to_string_lossy().as_bytes());
    hasher.update(b"|");
    hasher.update(&weights_len.to_le_bytes());

    let hash = hasher.finalize();
    let mut key = [0u8; TEXT_HASH_BYTES];
    key.copy_from_slice(&hash.as_bytes()[..TEXT_HASH_BYTES]);
    Ok(format!("bert:{}", to_hex(&key)))
}
