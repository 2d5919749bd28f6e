use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ScoringError;
use crate::constants::{
    DEFAULT_KEYWORD_WEIGHT, DEFAULT_LENGTH_WEIGHT, DEFAULT_SEMANTIC_WEIGHT, WEIGHT_SUM_TOLERANCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Blend weights for the three signals.
pub struct SignalWeights {
    pub semantic: f64,
    pub keyword: f64,
    pub length: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            semantic: DEFAULT_SEMANTIC_WEIGHT,
            keyword: DEFAULT_KEYWORD_WEIGHT,
            length: DEFAULT_LENGTH_WEIGHT,
        }
    }
}

impl SignalWeights {
    /// Builds weights that sum to 1.0.
    ///
    /// Inputs summing outside `1.0 ± 0.01` are rescaled proportionally. Negative,
    /// non-finite or all-zero inputs are rejected.
    pub fn new(semantic: f64, keyword: f64, length: f64) -> Result<Self, ScoringError> {
        let raw = Self {
            semantic,
            keyword,
            length,
        };

        if [semantic, keyword, length]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ScoringError::InvalidWeights {
                reason: format!(
                    "weights must be finite and non-negative (got {:?})",
                    raw
                ),
            });
        }

        let total = raw.sum();
        if total <= 0.0 {
            return Err(ScoringError::InvalidWeights {
                reason: "weights sum to zero".to_string(),
            });
        }

        if (total - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return Ok(raw);
        }

        warn!(total, "Signal weights do not sum to 1.0, normalizing");
        Ok(Self {
            semantic: semantic / total,
            keyword: keyword / total,
            length: length / total,
        })
    }

    pub fn sum(&self) -> f64 {
        self.semantic + self.keyword + self.length
    }

    /// Replaces fields present in `overrides`; the result is not renormalised.
    pub fn with_overrides(&self, overrides: Option<&WeightOverrides>) -> Self {
        let Some(o) = overrides else {
            return *self;
        };
        Self {
            semantic: o.semantic_weight.unwrap_or(self.semantic),
            keyword: o.keyword_weight.unwrap_or(self.keyword),
            length: o.length_weight.unwrap_or(self.length),
        }
    }

    /// `semantic × sem + keyword × kw + length × len`.
    #[inline]
    pub fn blend(&self, sem_score: f64, kw_score: f64, len_score: f64) -> f64 {
        self.semantic * sem_score + self.keyword * kw_score + self.length * len_score
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Per-request weight overrides (the `config` object of a score request).
pub struct WeightOverrides {
    #[serde(default)]
    pub semantic_weight: Option<f64>,
    #[serde(default)]
    pub keyword_weight: Option<f64>,
    #[serde(default)]
    pub length_weight: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        self.semantic_weight.is_none() && self.keyword_weight.is_none() && self.length_weight.is_none()
    }
}
