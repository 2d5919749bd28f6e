//! Aggregation of signal scores into per-criterion and overall scores.
//!
//! For each criterion the three signals are blended with [`SignalWeights`]:
//!
//! ```text
//! criterion_raw      = ws·sem + wk·kw + wl·len
//! criterion_weighted = criterion_raw · criterion.weight
//! overall            = Σ criterion_weighted / Σ criterion.weight
//! ```
//!
//! The overall score is therefore a weight-proportional mean of `criterion_raw`,
//! clamped to `[0, 100]` and rounded to 2 decimals. It is 0 when every
//! criterion weight is 0. The sums are taken over weights divided by the
//! largest weight, so they stay finite for any finite weights.

pub mod error;
pub mod feedback;
pub mod scorer;
pub mod service;
pub mod types;
pub mod weights;


pub use error::ScoringError;
pub use feedback::{POSITIVE_FEEDBACK, SignalScores, generate_feedback};
pub use scorer::TranscriptScorer;
pub use service::ScoringService;
pub use types::{CriterionResult, ReportMetadata, ScoreReport};
pub use weights::{SignalWeights, WeightOverrides};
