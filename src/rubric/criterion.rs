use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{RubricError, RubricResult};
use crate::constants::DEFAULT_CRITERION_WEIGHT;
use crate::signals::{KeywordMatch, keyword_score, keyword_score_compiled};
use crate::text::{KeywordMatcher, parse_keywords};

/// One weighted rubric dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Display name, also used in feedback.
    #[serde(alias = "criterion")]
    pub name: String,

    /// Text embedded for the semantic signal.
    #[serde(default)]
    pub description: String,

    /// Lowercase expected keywords; empty means no keyword constraint.
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,

    /// Relative share of the overall score. Missing or `null` means 1.0.
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,

    #[serde(default)]
    pub min_words: Option<u32>,

    #[serde(default)]
    pub max_words: Option<u32>,

    #[serde(skip)]
    embedding: Option<Arc<[f32]>>,

    #[serde(skip)]
    matchers: Vec<KeywordMatcher>,
}

fn default_weight() -> f64 {
    DEFAULT_CRITERION_WEIGHT
}

fn deserialize_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_CRITERION_WEIGHT))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeywords {
    List(Vec<String>),
    Delimited(String),
}

/// Accepts `["a", "b"]`, `"a, b; c"` or `null`.
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawKeywords>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawKeywords::Delimited(s)) => parse_keywords(&s),
        Some(RawKeywords::List(list)) => list
            .iter()
            .flat_map(|item| parse_keywords(item))
            .collect(),
    })
}

impl Criterion {
    /// Creates a criterion with default weight and no keywords or bounds.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            weight: DEFAULT_CRITERION_WEIGHT,
            min_words: None,
            max_words: None,
            embedding: None,
            matchers: Vec::new(),
        }
    }

    /// Sets keywords from a delimited string (see [`parse_keywords`]).
    pub fn with_keywords(mut self, raw: &str) -> Self {
        self.keywords = parse_keywords(raw);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets word-count bounds; `None` means unconstrained on that side.
    pub fn with_bounds(mut self, min_words: Option<u32>, max_words: Option<u32>) -> Self {
        self.min_words = min_words;
        self.max_words = max_words;
        self
    }

    /// Text to embed: the description, or the name when the description is blank.
    pub fn embedding_text(&self) -> Option<&str> {
        [self.description.as_str(), self.name.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|t| !t.is_empty())
    }

    /// Precomputed description embedding, if any.
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    pub(crate) fn set_embedding(&mut self, vector: Vec<f32>) {
        self.embedding = Some(Arc::from(vector));
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Compiles the keyword patterns used by [`keyword_match`](Self::keyword_match).
    ///
    /// Fails if any keyword cannot be turned into a pattern.
    pub fn compile_keywords(&mut self) -> RubricResult<()> {
        self.matchers = self
            .keywords
            .iter()
            .map(|kw| {
                KeywordMatcher::new(kw).map_err(|e| RubricError::InvalidCriterion {
                    criterion: self.name.clone(),
                    reason: format!("keyword '{}' cannot be matched: {}", kw, e),
                })
            })
            .collect::<RubricResult<_>>()?;
        Ok(())
    }

    /// Compiled keyword patterns (empty until [`compile_keywords`](Self::compile_keywords)).
    pub fn matchers(&self) -> &[KeywordMatcher] {
        &self.matchers
    }

    /// Keyword coverage of `transcript`.
    ///
    /// Uses the compiled patterns when they match the current keyword list and
    /// compiles on the fly otherwise.
    pub fn keyword_match(&self, transcript: &str) -> KeywordMatch {
        let compiled = self.matchers.len() == self.keywords.len()
            && self
                .matchers
                .iter()
                .zip(&self.keywords)
                .all(|(m, kw)| m.keyword() == kw);

        if compiled {
            keyword_score_compiled(transcript, &self.matchers)
        } else {
            keyword_score(transcript, &self.keywords)
        }
    }

    pub fn validate(&self) -> RubricResult<()> {
        let invalid = |reason: String| RubricError::InvalidCriterion {
            criterion: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(invalid(format!(
                "weight must be a finite, non-negative number (got {})",
                self.weight
            )));
        }
        if let (Some(min), Some(max)) = (self.min_words, self.max_words)
            && min > max
        {
            return Err(invalid(format!(
                "min_words ({}) exceeds max_words ({})",
                min, max
            )));
        }
        Ok(())
    }
}
