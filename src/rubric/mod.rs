//! Rubric model: weighted criteria with optional keyword lists and word bounds.
//!
//! A [`Rubric`] is built once at startup (built-in or from a JSON file),
//! validated, given description embeddings by [`Rubric::precompute_embeddings`],
//! and then shared read-only.
//!
//! # JSON format
//!
//! An array of criteria. `keywords` may be a list or a delimited string:
//!
//! ```json
//! [
//!   {"name": "Greeting", "description": "Opens with a greeting",
//!    "keywords": "hello, hi", "weight": 2.0},
//!   {"criterion": "Length", "min_words": 80, "max_words": 160}
//! ]
//! ```

mod builtin;
pub mod criterion;
pub mod error;


use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::EmbeddingCache;

pub use builtin::builtin_criteria;
pub use criterion::Criterion;
pub use error::{RubricError, RubricResult};

/// Label used for the rubric source when no file is configured.
pub const BUILTIN_RUBRIC_SOURCE: &str = "builtin";

#[derive(Debug, Clone, PartialEq)]
/// Ordered criteria plus where they came from.
pub struct Rubric {
    criteria: Vec<Criterion>,
    source: String,
}

impl Rubric {
    /// Validates `criteria` and compiles their keyword patterns.
    pub fn new(mut criteria: Vec<Criterion>, source: impl Into<String>) -> RubricResult<Self> {
        if criteria.is_empty() {
            return Err(RubricError::Empty);
        }
        for criterion in &mut criteria {
            criterion.validate()?;
            criterion.compile_keywords()?;
        }
        Ok(Self {
            criteria,
            source: source.into(),
        })
    }

    /// The built-in self-introduction rubric.
    pub fn builtin() -> Self {
        let mut criteria = builtin_criteria();
        for criterion in &mut criteria {
            if let Err(e) = criterion.compile_keywords() {
                warn!(error = %e, "Built-in keywords not precompiled");
            }
        }
        Self {
            criteria,
            source: BUILTIN_RUBRIC_SOURCE.to_string(),
        }
    }

    /// Loads a JSON array of criteria from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> RubricResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading rubric");

        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RubricError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RubricError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let rubric = Self::from_json_str(&content, path.display().to_string()).map_err(
            |e| match e {
                RubricError::Parse { reason, .. } => RubricError::Parse {
                    path: path.to_path_buf(),
                    reason,
                },
                other => other,
            },
        )?;

        for criterion in rubric.criteria() {
            debug!(
                criterion = %criterion.name,
                weight = criterion.weight,
                keywords = criterion.keywords.len(),
                min_words = ?criterion.min_words,
                max_words = ?criterion.max_words,
                "Rubric criterion"
            );
        }
        info!(criteria = rubric.len(), "Rubric loaded");
        Ok(rubric)
    }

    /// Parses a JSON array of criteria.
    pub fn from_json_str(json: &str, source: impl Into<String>) -> RubricResult<Self> {
        let criteria: Vec<Criterion> =
            serde_json::from_str(json).map_err(|e| RubricError::Parse {
                path: PathBuf::new(),
                reason: e.to_string(),
            })?;
        Self::new(criteria, source)
    }

    /// Loads `path` when given, otherwise the built-in rubric.
    pub fn load(path: Option<&Path>) -> RubricResult<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Embeds every criterion's description through `cache` in one batch.
    ///
    /// Criteria with neither description nor name get no embedding. Returns the
    /// number of criteria embedded.
    pub fn precompute_embeddings(&mut self, cache: &EmbeddingCache) -> RubricResult<usize> {
        let targets: Vec<(usize, String)> = self
            .criteria
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.embedding_text().map(|t| (i, t.to_string())))
            .collect();

        if targets.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = targets.iter().map(|(_, t)| t.as_str()).collect();
        let vectors = cache.encode_batch(&texts, true)?;

        for ((index, _), vector) in targets.iter().zip(vectors) {
            self.criteria[*index].set_embedding(vector);
        }

        info!(
            embedded = targets.len(),
            criteria = self.criteria.len(),
            "Pre-computed rubric description embeddings"
        );
        Ok(targets.len())
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Label of the rubric source (`"builtin"` or the file path).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Sum of criterion weights.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Returns `true` if any criterion has a description embedding.
    pub fn has_embeddings(&self) -> bool {
        self.criteria.iter().any(|c| c.embedding().is_some())
    }
}
