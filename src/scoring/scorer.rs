use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::ScoringError;
use super::feedback::{SignalScores, generate_feedback};
use super::types::{CriterionResult, ReportMetadata, ScoreReport, round2};
use super::weights::{SignalWeights, WeightOverrides};
use crate::cache::EmbeddingCache;
use crate::constants::{MAX_SCORE, NEUTRAL_SEMANTIC_SCORE};
use crate::rubric::{Criterion, Rubric};
use crate::signals::{length_score, semantic_score};
use crate::text::count_words;

/// Scores transcripts against a fixed, pre-embedded rubric.
pub struct TranscriptScorer {
    rubric: Rubric,
    weights: SignalWeights,
    cache: Arc<EmbeddingCache>,
}

impl std::fmt::Debug for TranscriptScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptScorer")
            .field("criteria", &self.rubric.len())
            .field("rubric", &self.rubric.source())
            .field("weights", &self.weights)
            .field("cache", &self.cache)
            .finish()
    }
}

impl TranscriptScorer {
    /// Embeds the rubric descriptions through `cache` and builds the scorer.
    pub fn new(
        mut rubric: Rubric,
        weights: SignalWeights,
        cache: Arc<EmbeddingCache>,
    ) -> Result<Self, ScoringError> {
        rubric.precompute_embeddings(&cache)?;
        Ok(Self::from_parts(rubric, weights, cache))
    }

    /// Builds the scorer around `rubric` as-is, without embedding descriptions.
    ///
    /// Criteria lacking an embedding score a neutral semantic 50.
    pub fn from_parts(rubric: Rubric, weights: SignalWeights, cache: Arc<EmbeddingCache>) -> Self {
        Self {
            rubric,
            weights,
            cache,
        }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn weights(&self) -> SignalWeights {
        self.weights
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// Scores `transcript` with optional per-call weight overrides.
    ///
    /// Rejects blank transcripts before any work. The transcript is encoded once,
    /// bypassing the cache.
    #[instrument(skip_all, fields(transcript_len = transcript.len()))]
    pub fn score(
        &self,
        transcript: &str,
        overrides: Option<&WeightOverrides>,
    ) -> Result<ScoreReport, ScoringError> {
        if transcript.trim().is_empty() {
            return Err(ScoringError::EmptyTranscript);
        }

        let weights = self.weights.with_overrides(overrides);
        let total_words = count_words(transcript);

        let transcript_embedding = if self.rubric.has_embeddings() {
            Some(self.cache.encode(transcript, false)?)
        } else {
            None
        };

        // Weights are scaled by the largest one so the sums stay finite.
        let max_weight = self
            .rubric
            .criteria()
            .iter()
            .map(|c| c.weight)
            .fold(0.0, f64::max);

        let mut per_criterion = Vec::with_capacity(self.rubric.len());
        let mut sum_scaled = 0.0;
        let mut sum_shares = 0.0;

        for criterion in self.rubric.criteria() {
            let (result, raw) = self.score_criterion(
                criterion,
                transcript,
                transcript_embedding.as_deref(),
                total_words,
                &weights,
            );
            if max_weight > 0.0 {
                let share = criterion.weight / max_weight;
                sum_scaled += raw * share;
                sum_shares += share;
            }
            per_criterion.push(result);
        }

        let overall = if sum_shares > 0.0 {
            sum_scaled / sum_shares
        } else {
            0.0
        };
        let overall = if overall.is_finite() { overall } else { 0.0 };
        let overall_score = round2(overall.clamp(0.0, MAX_SCORE));

        debug!(
            overall_score,
            total_words,
            criteria = per_criterion.len(),
            "Transcript scored"
        );

        Ok(ScoreReport {
            overall_score,
            per_criterion,
            metadata: ReportMetadata {
                semantic_weight: weights.semantic,
                keyword_weight: weights.keyword,
                length_weight: weights.length,
                rubric_path: self.rubric.source().to_string(),
                total_words,
            },
        })
    }

    /// Returns the rounded result and the unrounded blended score.
    fn score_criterion(
        &self,
        criterion: &Criterion,
        transcript: &str,
        transcript_embedding: Option<&[f32]>,
        total_words: usize,
        weights: &SignalWeights,
    ) -> (CriterionResult, f64) {
        let keywords = criterion.keyword_match(transcript);

        let sem_score = match (transcript_embedding, criterion.embedding()) {
            (Some(t), Some(c)) => semantic_score(t, c),
            _ => NEUTRAL_SEMANTIC_SCORE,
        };

        let len_score = length_score(total_words, criterion.min_words, criterion.max_words);

        let criterion_raw = weights.blend(sem_score, keywords.score, len_score);
        let criterion_weighted = criterion_raw * criterion.weight;

        let feedback = generate_feedback(
            criterion,
            SignalScores {
                kw_score: keywords.score,
                sem_score,
                len_score,
            },
            &keywords.found,
            total_words,
        );

        debug!(
            criterion = %criterion.name,
            kw_score = keywords.score,
            sem_score,
            len_score,
            criterion_raw,
            "Criterion scored"
        );

        let result = CriterionResult {
            criterion: criterion.name.clone(),
            weight: criterion.weight,
            words: total_words,
            keywords_expected: criterion.keywords.clone(),
            keywords_found: keywords.found,
            kw_score: round2(keywords.score),
            sem_score: round2(sem_score),
            len_score: round2(len_score),
            criterion_raw: round2(criterion_raw),
            criterion_weighted: round2(criterion_weighted),
            feedback,
        };

        (result, criterion_raw)
    }
}
