//! Rule-based feedback text for one criterion.

use crate::constants::{
    KEYWORD_FEEDBACK_THRESHOLD, LENGTH_FEEDBACK_THRESHOLD, MAX_MISSING_KEYWORDS_REPORTED,
    SEMANTIC_FEEDBACK_THRESHOLD,
};
use crate::rubric::Criterion;

/// Returned when no rule fires.
pub const POSITIVE_FEEDBACK: &str = "Good — meets rubric expectations.";

/// Signal scores feedback is derived from.
#[derive(Debug, Clone, Copy)]
pub struct SignalScores {
    pub kw_score: f64,
    pub sem_score: f64,
    pub len_score: f64,
}

/// Builds the feedback string for `criterion`.
///
/// Triggered messages are joined with `"; "` and end with a period. Missing
/// keywords are listed in rubric order, at most three.
pub fn generate_feedback(
    criterion: &Criterion,
    scores: SignalScores,
    keywords_found: &[String],
    word_count: usize,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if criterion.has_keywords() && scores.kw_score < KEYWORD_FEEDBACK_THRESHOLD {
        let missing: Vec<&str> = criterion
            .keywords
            .iter()
            .filter(|kw| !keywords_found.contains(kw))
            .map(String::as_str)
            .take(MAX_MISSING_KEYWORDS_REPORTED)
            .collect();
        parts.push(format!("Include more keywords like: {}", missing.join(", ")));
    }

    if scores.sem_score < SEMANTIC_FEEDBACK_THRESHOLD {
        parts.push(format!(
            "Content seems off-topic; focus more on {}",
            criterion.name.to_lowercase()
        ));
    }

    if scores.len_score < LENGTH_FEEDBACK_THRESHOLD {
        // Zero bounds are treated as absent.
        let min = criterion.min_words.filter(|&n| n > 0);
        let max = criterion.max_words.filter(|&n| n > 0);
        let advice = match (min, max) {
            (Some(min), Some(max)) => Some(format!(
                "Adjust length (current: {} words; rubric suggests {}-{})",
                word_count, min, max
            )),
            (Some(min), None) => Some(format!(
                "Increase length (current: {} words; minimum: {})",
                word_count, min
            )),
            (None, Some(max)) => Some(format!(
                "Reduce length (current: {} words; maximum: {})",
                word_count, max
            )),
            (None, None) => None,
        };
        parts.extend(advice);
    }

    if parts.is_empty() {
        return POSITIVE_FEEDBACK.to_string();
    }

    format!("{}.", parts.join("; "))
}
