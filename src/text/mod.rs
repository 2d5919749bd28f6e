//! Text utilities: word counting, keyword-list parsing, whole-word matching.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Compiled-size cap for one keyword pattern.
pub const KEYWORD_PATTERN_SIZE_LIMIT: usize = 256 * 1024;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static KEYWORD_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;|/]").expect("separator pattern is valid"));

/// Counts maximal runs of Unicode word characters (letters, digits, underscore).
pub fn count_words(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    WORD_RE.find_iter(text).count()
}

/// Splits a raw keyword list on `,` `;` `|` `/`, trimming and lowercasing each token.
///
/// Empty tokens are dropped; an empty input yields an empty list.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    KEYWORD_SEPARATOR_RE
        .split(raw)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Compiles a case-sensitive whole-word matcher for `keyword`.
///
/// Returns `Ok(None)` for a blank keyword, which never matches.
pub fn whole_word_pattern(keyword: &str) -> Result<Option<Regex>, regex::Error> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .size_limit(KEYWORD_PATTERN_SIZE_LIMIT)
        .build()
        .map(Some)
}

/// Returns `true` if `keyword` occurs in `haystack` at word boundaries.
///
/// Callers are expected to lowercase both sides for case-insensitive matching.
/// A keyword whose pattern fails to compile is logged and never matches.
pub fn contains_whole_word(haystack: &str, keyword: &str) -> bool {
    match whole_word_pattern(keyword) {
        Ok(pattern) => pattern.is_some_and(|re| re.is_match(haystack)),
        Err(e) => {
            warn!(keyword_len = keyword.len(), error = %e, "Keyword pattern rejected");
            false
        }
    }
}

/// A keyword with its whole-word pattern compiled once.
///
/// Matching is case-insensitive: the pattern is built from the lowercased
/// keyword and the haystack is expected in lowercase.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            keyword: keyword.to_string(),
            pattern: whole_word_pattern(&keyword.to_lowercase())?,
        })
    }

    /// The keyword as written in the rubric.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, haystack_lower: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(haystack_lower))
    }
}

impl PartialEq for KeywordMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
    }
}
