//! Cross-cutting, shared constants.
//!
//! Scores are expressed on a 0–100 scale everywhere. Thresholds below refer to
//! that scale.

/// Output dimension of the default sentence-embedding model (all-MiniLM-L6-v2).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the BERT encoder per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.5;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.4;
pub const DEFAULT_LENGTH_WEIGHT: f64 = 0.1;

/// Signal weights summing outside `1.0 ± WEIGHT_SUM_TOLERANCE` are renormalised.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Criterion weight used when a rubric entry omits one.
pub const DEFAULT_CRITERION_WEIGHT: f64 = 1.0;

/// Semantic score used for criteria without a description embedding.
pub const NEUTRAL_SEMANTIC_SCORE: f64 = 50.0;

pub const MAX_SCORE: f64 = 100.0;

pub const KEYWORD_FEEDBACK_THRESHOLD: f64 = 50.0;
pub const SEMANTIC_FEEDBACK_THRESHOLD: f64 = 30.0;
pub const LENGTH_FEEDBACK_THRESHOLD: f64 = 70.0;

/// Max missing keywords listed in feedback.
pub const MAX_MISSING_KEYWORDS_REPORTED: usize = 3;

/// Default file name of the persisted embedding cache.
pub const DEFAULT_CACHE_FILENAME: &str = "embeddings.rkyv";

/// Bumped whenever the persisted snapshot layout changes.
pub const CACHE_SNAPSHOT_VERSION: u32 = 2;
