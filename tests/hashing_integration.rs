//! Integration tests for cache keys and deterministic encoders.

use std::collections::HashSet;

use rubric::hashing::{TEXT_HASH_BYTES, hash_text, seed_for};
use rubric::{OfflineEncoder, Rubric, TextEncoder};

#[test]
fn test_hash_text_matches_blake3_prefix() {
    let text = "Includes essential information: name, age, class, school";
    let full = blake3::hash(text.as_bytes());
    assert_eq!(&hash_text(text)[..], &full.as_bytes()[..TEXT_HASH_BYTES]);
}

#[test]
fn test_builtin_descriptions_have_distinct_keys() {
    let rubric = Rubric::builtin();
    let keys: HashSet<_> = rubric
        .criteria()
        .iter()
        .filter_map(|c| c.embedding_text())
        .map(hash_text)
        .collect();
    assert_eq!(keys.len(), rubric.len());
}

#[test]
fn test_hash_is_whitespace_and_case_sensitive() {
    let inputs = ["Good morning", "good morning", "Good morning ", "Good  morning"];
    let keys: HashSet<_> = inputs.iter().map(|t| hash_text(t)).collect();
    assert_eq!(keys.len(), inputs.len());
}

#[test]
fn test_offline_encoder_is_deterministic_across_instances() {
    let a = OfflineEncoder::new(64).expect("encoder");
    let b = OfflineEncoder::new(64).expect("encoder");

    let text = "Hello everyone, my name is Sam";
    assert_eq!(a.embed(text), b.embed(text));
    assert_ne!(a.embed(text), a.embed("Hello everyone, my name is Max"));
}

#[test]
fn test_offline_vectors_are_unit_length() {
    let encoder = OfflineEncoder::new(128).expect("encoder");
    let vectors = encoder
        .encode_batch(&["first", "second", ""])
        .expect("batch");

    for v in vectors {
        assert_eq!(v.len(), 128);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }
}

#[test]
fn test_seed_depends_on_label() {
    assert_ne!(seed_for("offline-encoder", "x"), seed_for("mock-encoder", "x"));
    assert_eq!(seed_for("offline-encoder", "x"), seed_for("offline-encoder", "x"));
}

#[tokio::test]
async fn test_concurrent_hashing_consistency() {
    let text = "concurrent transcript";
    let handles: Vec<_> = (0..64)
        .map(|_| tokio::spawn(async move { hash_text(text) }))
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("Task should complete"));
    }

    let first = results[0];
    for (i, result) in results.iter().enumerate() {
        assert_eq!(*result, first, "Hash mismatch at iteration {}", i);
    }
}
