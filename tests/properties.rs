//! Property tests over whole reports.

mod common;

use common::fixtures::{builtin_scorer, mock_encoder};
use proptest::prelude::*;
use rubric::WeightOverrides;

fn arb_transcript() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-z]{1,10}",
            Just("hello".to_string()),
            Just("good morning".to_string()),
            Just("my name is".to_string()),
            Just("thank you".to_string()),
            Just("school".to_string()),
        ],
        1..200,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_weight() -> impl Strategy<Value = f64> {
    0.0f64..1.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Signal scores and the overall score stay within 0..=100.
    #[test]
    fn scores_are_bounded(
        transcript in arb_transcript(),
        semantic in arb_weight(),
        keyword in arb_weight(),
        length in arb_weight(),
    ) {
        prop_assume!(semantic + keyword + length > 1e-6);
        let scorer = builtin_scorer(&mock_encoder());
        let overrides = WeightOverrides {
            semantic_weight: Some(semantic),
            keyword_weight: Some(keyword),
            length_weight: Some(length),
        };

        let report = scorer.score(&transcript, Some(&overrides)).expect("score");
        prop_assert!((0.0..=100.0).contains(&report.overall_score));
        for c in &report.per_criterion {
            for s in [c.kw_score, c.sem_score, c.len_score] {
                prop_assert!((0.0..=100.0).contains(&s), "{} out of range: {}", c.criterion, s);
            }
            prop_assert!(c.keywords_found.len() <= c.keywords_expected.len());
            prop_assert!(!c.feedback.is_empty());
        }
    }

    /// Scoring the same transcript twice gives identical reports.
    #[test]
    fn scoring_is_idempotent(transcript in arb_transcript()) {
        let scorer = builtin_scorer(&mock_encoder());
        let a = scorer.score(&transcript, None).expect("first");
        let b = scorer.score(&transcript, None).expect("second");
        prop_assert_eq!(a, b);
    }

    /// Word count in metadata matches every criterion row.
    #[test]
    fn word_counts_agree(transcript in arb_transcript()) {
        let scorer = builtin_scorer(&mock_encoder());
        let report = scorer.score(&transcript, None).expect("score");
        for c in &report.per_criterion {
            prop_assert_eq!(c.words, report.metadata.total_words);
        }
    }
}
