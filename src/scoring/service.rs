//! Process-wide scoring service with an explicit "not ready" state.

use std::sync::Arc;

use tracing::{error, info};

use super::error::ScoringError;
use super::scorer::TranscriptScorer;
use super::types::ScoreReport;
use super::weights::WeightOverrides;
use crate::cache::EmbeddingCache;
use crate::config::Config;
use crate::embedding::{EncoderMode, build_encoder};
use crate::rubric::Rubric;

#[derive(Debug, Clone)]
/// Wraps an optional [`TranscriptScorer`].
///
/// Initialization failures leave the service not ready instead of aborting, so
/// the HTTP layer can still answer health checks.
pub struct ScoringService {
    scorer: Option<Arc<TranscriptScorer>>,
    encoder_mode: EncoderMode,
}

impl ScoringService {
    /// Builds rubric, encoder, cache and scorer from `config`.
    pub fn initialize(config: &Config) -> Self {
        match Self::build_scorer(config) {
            Ok(scorer) => {
                info!(
                    criteria = scorer.rubric().len(),
                    rubric = scorer.rubric().source(),
                    encoder_mode = %config.encoder_mode,
                    cached_embeddings = scorer.cache().len(),
                    "Scoring service ready"
                );
                Self::from_scorer(scorer)
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize scoring service");
                Self::not_ready(config.encoder_mode)
            }
        }
    }

    /// Fallible construction used by [`initialize`](Self::initialize).
    pub fn build_scorer(config: &Config) -> Result<TranscriptScorer, ScoringError> {
        config.validate()?;

        let rubric = Rubric::load(config.rubric_path.as_deref())?;
        let weights = config.signal_weights()?;
        let encoder = build_encoder(&config.encoder_config())?;
        let cache = Arc::new(EmbeddingCache::new(encoder, config.cache_config()));

        TranscriptScorer::new(rubric, weights, cache)
    }

    pub fn from_scorer(scorer: TranscriptScorer) -> Self {
        let encoder_mode = scorer.cache().encoder_mode();
        Self {
            scorer: Some(Arc::new(scorer)),
            encoder_mode,
        }
    }

    pub fn not_ready(encoder_mode: EncoderMode) -> Self {
        Self {
            scorer: None,
            encoder_mode,
        }
    }

    /// Scores `transcript`, failing with [`ScoringError::NotReady`] when uninitialised.
    pub fn score(
        &self,
        transcript: &str,
        overrides: Option<&WeightOverrides>,
    ) -> Result<ScoreReport, ScoringError> {
        let scorer = self.scorer.as_ref().ok_or(ScoringError::NotReady)?;
        scorer.score(transcript, overrides)
    }

    pub fn scorer(&self) -> Option<&Arc<TranscriptScorer>> {
        self.scorer.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.scorer.is_some()
    }

    pub fn rubric_loaded(&self) -> bool {
        self.scorer.as_ref().is_some_and(|s| !s.rubric().is_empty())
    }

    pub fn encoder_mode(&self) -> EncoderMode {
        self.encoder_mode
    }
}
