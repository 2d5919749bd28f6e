//! Instrumented encoder for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::encoder::{EncoderMode, TextEncoder, normalize};
use super::error::EmbeddingError;
use super::offline::pseudo_embedding;
use crate::hashing::seed_for;

const SEED_LABEL: &str = "mock-encoder";

/// Deterministic encoder that records how it was called.
///
/// Fixed vectors can be pinned per text with [`MockEncoder::with_vector`] to
/// steer cosine similarity in tests.
#[derive(Debug, Default)]
pub struct MockEncoder {
    embedding_dim: usize,
    calls: AtomicUsize,
    texts_encoded: AtomicUsize,
    fail: AtomicBool,
    pinned: Mutex<HashMap<String, Vec<f32>>>,
    history: Mutex<Vec<Vec<String>>>,
}

impl MockEncoder {
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            ..Default::default()
        }
    }

    /// Pins the (normalised) vector returned for `text`.
    pub fn with_vector(self, text: &str, mut vector: Vec<f32>) -> Self {
        vector.resize(self.embedding_dim, 0.0);
        normalize(&mut vector);
        self.pinned.lock().insert(text.to_string(), vector);
        self
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `encode_batch` invocations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total number of texts passed to `encode_batch`.
    pub fn texts_encoded(&self) -> usize {
        self.texts_encoded.load(Ordering::SeqCst)
    }

    /// Batches received, in call order.
    pub fn history(&self) -> Vec<Vec<String>> {
        self.history.lock().clone()
    }
}

impl TextEncoder for MockEncoder {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock encoder configured to fail".to_string(),
            });
        }

        self.texts_encoded.fetch_add(texts.len(), Ordering::SeqCst);
        self.history
            .lock()
            .push(texts.iter().map(|t| t.to_string()).collect());

        let pinned = self.pinned.lock();
        Ok(texts
            .iter()
            .map(|text| {
                pinned.get(*text).cloned().unwrap_or_else(|| {
                    pseudo_embedding(seed_for(SEED_LABEL, text), self.embedding_dim)
                })
            })
            .collect())
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn mode(&self) -> EncoderMode {
        EncoderMode::Offline
    }

    fn identity(&self) -> String {
        format!("mock:{}", self.embedding_dim)
    }
}
