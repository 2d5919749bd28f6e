//! Rubric library crate (used by the server and integration tests).
//!
//! Scores free-text transcripts against a rubric of weighted criteria by
//! blending three signals per criterion: keyword coverage, semantic similarity
//! to the criterion description, and word-count conformance.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Rubric`], [`Criterion`] - Rubric model and loader
//! - [`TranscriptScorer`], [`ScoringService`], [`ScoreReport`] - Aggregation
//! - [`SignalWeights`], [`WeightOverrides`] - Signal blending
//!
//! ## Embedding & Cache
//! - [`TextEncoder`], [`BertEncoder`], [`OfflineEncoder`] - Embedding backends
//! - [`EmbeddingCache`], [`CacheConfig`] - Hash-keyed, persisted vectors
//!
//! ## Utilities
//! - [`signals`] - Keyword, semantic and length scores
//! - [`text`] - Word counting and keyword parsing
//! - [`hashing`] - Cache keys and seeds
//!
//! ## Test/Mock Support
//! `MockEncoder` is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod rubric;
pub mod scoring;
pub mod signals;
pub mod text;

pub use cache::{CacheConfig, CacheError, CacheSnapshot, EmbeddingCache};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use embedding::{
    BertEncoder, EmbeddingError, EncoderConfig, EncoderMode, OfflineEncoder, TextEncoder,
    build_encoder,
};
pub use hashing::{hash_text, hash_to_u64};
pub use rubric::{Criterion, Rubric, RubricError};
pub use scoring::{
    CriterionResult, ReportMetadata, ScoreReport, ScoringError, ScoringService, SignalWeights,
    TranscriptScorer, WeightOverrides,
};
pub use signals::{
    KeywordMatch, cosine_similarity, keyword_score, keyword_score_compiled, length_score,
    semantic_score,
};
pub use text::{count_words, parse_keywords};
