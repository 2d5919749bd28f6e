//! The three per-criterion signals, each on a 0–100 scale.
//!
//! - [`keyword_score`]: share of expected keywords present as whole words.
//! - [`semantic_score`]: clamped cosine similarity between transcript and
//!   criterion embeddings.
//! - [`length_score`]: continuous penalty for word counts outside the bounds.
//!
//! All three are pure functions; the aggregator owns weighting.


use crate::constants::MAX_SCORE;
use crate::text::{KeywordMatcher, contains_whole_word};

#[derive(Debug, Clone, PartialEq)]
/// Result of [`keyword_score`].
pub struct KeywordMatch {
    /// Matched / expected × 100; 100 when nothing is expected.
    pub score: f64,
    /// Expected keywords found, in expected order.
    pub found: Vec<String>,
}

/// Case-insensitive whole-word keyword coverage.
///
/// An empty `keywords` list means "no constraint" and scores 100.
pub fn keyword_score(transcript: &str, keywords: &[String]) -> KeywordMatch {
    if keywords.is_empty() {
        return KeywordMatch {
            score: MAX_SCORE,
            found: Vec::new(),
        };
    }

    let haystack = transcript.to_lowercase();
    let found: Vec<String> = keywords
        .iter()
        .filter(|kw| contains_whole_word(&haystack, &kw.to_lowercase()))
        .cloned()
        .collect();

    let score = found.len() as f64 / keywords.len() as f64 * MAX_SCORE;
    KeywordMatch { score, found }
}

/// [`keyword_score`] over patterns compiled ahead of time.
pub fn keyword_score_compiled(transcript: &str, matchers: &[KeywordMatcher]) -> KeywordMatch {
    if matchers.is_empty() {
        return KeywordMatch {
            score: MAX_SCORE,
            found: Vec::new(),
        };
    }

    let haystack = transcript.to_lowercase();
    let found: Vec<String> = matchers
        .iter()
        .filter(|m| m.is_match(&haystack))
        .map(|m| m.keyword().to_string())
        .collect();

    let score = found.len() as f64 / matchers.len() as f64 * MAX_SCORE;
    KeywordMatch { score, found }
}

/// Cosine similarity in `[-1, 1]`.
///
/// Returns 0 for mismatched lengths, empty input or a zero-norm vector.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Cosine similarity scaled to 0–100, with negative similarity clamped to 0.
pub fn semantic_score(transcript_embedding: &[f32], criterion_embedding: &[f32]) -> f64 {
    let similarity = cosine_similarity(transcript_embedding, criterion_embedding);
    f64::from(similarity.max(0.0)) * MAX_SCORE
}

/// Word-count conformance against optional `[min, max]` bounds.
///
/// Undershoot scores `100 × count / min`, overshoot `100 × max / count`. A zero
/// minimum is always met.
pub fn length_score(word_count: usize, min_words: Option<u32>, max_words: Option<u32>) -> f64 {
    let count = word_count as f64;

    let below_min = min_words
        .filter(|&min| min > 0 && word_count < min as usize)
        .map(|min| count / f64::from(min));
    if let Some(ratio) = below_min {
        return (ratio * MAX_SCORE).max(0.0);
    }

    let above_max = max_words
        .filter(|&max| word_count > max as usize)
        .map(|max| f64::from(max) / count);
    if let Some(ratio) = above_max {
        return (ratio * MAX_SCORE).max(0.0);
    }

    MAX_SCORE
}
