//! Test fixtures for integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use rubric::cache::{CacheConfig, EmbeddingCache};
use rubric::config::Config;
use rubric::embedding::{EncoderMode, MockEncoder, TextEncoder};
use rubric::rubric::Rubric;
use rubric::scoring::{SignalWeights, TranscriptScorer};

pub const EMBEDDING_DIM: usize = 32;

pub const SAM_TRANSCRIPT: &str =
    "Hello everyone, my name is Sam, I am in class 5, I love reading books";

/// A complete self-introduction (~110 words) touching most built-in criteria.
pub const FULL_INTRODUCTION: &str = "Good morning everyone! I am excited to introduce myself. \
My name is Priya and I am twelve years old. I study in class seven at Green Valley School. \
My family has four members: my mother, my father, my brother and me. My mother is a teacher \
and my father is an engineer. In my free time my hobby is painting, and I also enjoy playing \
the guitar. I love to explore new places and discover interesting facts about nature. \
My dream is to become a scientist and improve the lives of people. A fun fact about me is \
that I can solve a puzzle cube in one minute. Thank you for listening, that's all from me.";

/// `n` copies of a single word.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

pub fn mock_encoder() -> Arc<MockEncoder> {
    Arc::new(MockEncoder::new(EMBEDDING_DIM))
}

/// Cache over `encoder`, persisted in `dir` when given.
pub fn cache_with(encoder: &Arc<MockEncoder>, dir: Option<&Path>) -> Arc<EmbeddingCache> {
    let config = dir.map(CacheConfig::in_dir).unwrap_or_default();
    let encoder: Arc<dyn TextEncoder> = encoder.clone();
    Arc::new(EmbeddingCache::new(encoder, config))
}

/// Built-in rubric scorer over a mock encoder.
pub fn builtin_scorer(encoder: &Arc<MockEncoder>) -> TranscriptScorer {
    TranscriptScorer::new(
        Rubric::builtin(),
        SignalWeights::default(),
        cache_with(encoder, None),
    )
    .expect("builtin scorer")
}

/// Offline-mode configuration rooted at `cache_dir`.
pub fn offline_config(cache_dir: &Path) -> Config {
    Config {
        encoder_mode: EncoderMode::Offline,
        cache_dir: cache_dir.to_path_buf(),
        embedding_dim: EMBEDDING_DIM,
        ..Default::default()
    }
}
