use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-criterion breakdown. Score fields are rounded to 2 decimals.
pub struct CriterionResult {
    /// Criterion name.
    pub criterion: String,
    pub weight: f64,
    /// Transcript word count.
    pub words: usize,
    pub keywords_expected: Vec<String>,
    /// Subset of `keywords_expected`, in expected order.
    pub keywords_found: Vec<String>,
    pub kw_score: f64,
    pub sem_score: f64,
    pub len_score: f64,
    /// Blended signal score before the criterion weight.
    pub criterion_raw: f64,
    /// `criterion_raw × weight`.
    pub criterion_weighted: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Settings a report was produced with.
pub struct ReportMetadata {
    pub semantic_weight: f64,
    pub keyword_weight: f64,
    pub length_weight: f64,
    /// `"builtin"` or the rubric file path.
    pub rubric_path: String,
    pub total_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of scoring one transcript.
pub struct ScoreReport {
    /// Weight-proportional mean of criterion scores, in `[0, 100]`.
    pub overall_score: f64,
    pub per_criterion: Vec<CriterionResult>,
    pub metadata: ReportMetadata,
}

/// Rounds to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
