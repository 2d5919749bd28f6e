use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::constants::{CACHE_SNAPSHOT_VERSION, DEFAULT_CACHE_FILENAME};
use crate::embedding::{EmbeddingError, MockEncoder, OfflineEncoder, TextEncoder};
use crate::hashing::hash_text;

const DIM: usize = 16;

fn mock() -> Arc<MockEncoder> {
    Arc::new(MockEncoder::new(DIM))
}

fn cache_with(encoder: &Arc<MockEncoder>, config: CacheConfig) -> EmbeddingCache {
    let encoder: Arc<dyn TextEncoder> = encoder.clone();
    EmbeddingCache::new(encoder, config)
}

mod lookup_tests {
    use super::*;

    #[test]
    fn test_hit_does_not_invoke_encoder() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        let first = cache.encode("hello", true).expect("encode");
        let second = cache.encode("hello", true).expect("encode");

        assert_eq!(first, second);
        assert_eq!(encoder.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_use_cache_false_neither_reads_nor_writes() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        cache.encode("hello", true).expect("encode");
        assert_eq!(encoder.calls(), 1);

        cache.encode("hello", false).expect("encode");
        assert_eq!(encoder.calls(), 2, "uncached encode must call the encoder");

        cache.encode("transcript", false).expect("encode");
        assert!(!cache.contains("transcript"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_misses_are_encoded_in_one_batch() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        cache.encode("a", true).expect("encode");
        let out = cache.encode_batch(&["a", "b", "c"], true).expect("encode");

        assert_eq!(out.len(), 3);
        assert_eq!(encoder.calls(), 2);
        assert_eq!(
            encoder.history()[1],
            vec!["b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_duplicate_texts_encoded_once_and_order_preserved() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        let out = cache
            .encode_batch(&["x", "y", "x"], true)
            .expect("encode");

        assert_eq!(encoder.texts_encoded(), 2);
        assert_eq!(out[0], out[2]);
        assert_ne!(out[0], out[1]);
        assert_eq!(out[1], cache.get("y").expect("cached"));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        let out = cache.encode_batch(&[], true).expect("encode");
        assert!(out.is_empty());
        assert_eq!(encoder.calls(), 0);
    }

    #[test]
    fn test_encoder_failure_propagates_and_caches_nothing() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());
        encoder.set_failing(true);

        let result = cache.encode("hello", true);
        assert!(matches!(result, Err(EmbeddingError::InferenceFailed { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cached_value_matches_uncached_value() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());

        let cached = cache.encode("same text", true).expect("encode");
        let fresh = cache.encode("same text", false).expect("encode");
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_clear() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());
        cache.encode("a", true).expect("encode");
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn test_in_memory_cache_has_no_path() {
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_memory());
        assert!(cache.path().is_none());
        assert!(cache.persist().expect("persist").is_none());
    }

    #[test]
    fn test_batch_with_new_entries_writes_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_dir(dir.path()));

        cache.encode("persist me", true).expect("encode");

        let path = dir.path().join(DEFAULT_CACHE_FILENAME);
        assert!(path.exists());
        assert_eq!(cache.path(), Some(path.as_path()));
    }

    #[test]
    fn test_uncached_encode_does_not_write_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::in_dir(dir.path()));

        cache.encode("ephemeral", false).expect("encode");
        assert!(!dir.path().join(DEFAULT_CACHE_FILENAME).exists());
    }

    #[test]
    fn test_reload_is_bit_identical_without_encoder_calls() {
        let dir = TempDir::new().expect("tempdir");

        let first_encoder = mock();
        let original = {
            let cache = cache_with(&first_encoder, CacheConfig::in_dir(dir.path()));
            cache.encode("round trip", true).expect("encode")
        };

        let second_encoder = mock();
        let reloaded = cache_with(&second_encoder, CacheConfig::in_dir(dir.path()));
        assert_eq!(reloaded.len(), 1);

        let again = reloaded.encode("round trip", true).expect("encode");
        assert_eq!(
            original.iter().map(|f| f.to_bits()).collect::<Vec<_>>(),
            again.iter().map(|f| f.to_bits()).collect::<Vec<_>>()
        );
        assert_eq!(second_encoder.calls(), 0);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILENAME);
        std::fs::write(&path, b"definitely not an rkyv archive").expect("write");

        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::at_path(&path));
        assert!(cache.is_empty());

        cache.encode("recovered", true).expect("encode");
        let reloaded = cache_with(&mock(), CacheConfig::at_path(&path));
        assert_eq!(reloaded.len(), 1, "corrupt file is overwritten by next save");
    }

    #[test]
    fn test_truncated_snapshot_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILENAME);
        {
            let cache = cache_with(&mock(), CacheConfig::at_path(&path));
            cache.encode_batch(&["a", "b", "c"], true).expect("encode");
        }
        let bytes = std::fs::read(&path).expect("read");
        std::fs::write(&path, &bytes[..bytes.len() / 2]).expect("truncate");

        let cache = cache_with(&mock(), CacheConfig::at_path(&path));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_snapshot_from_other_dimension_is_discarded() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILENAME);
        {
            let cache = cache_with(&mock(), CacheConfig::at_path(&path));
            cache.encode("a", true).expect("encode");
        }

        let wider: Arc<dyn TextEncoder> = Arc::new(MockEncoder::new(DIM * 2));
        let cache = EmbeddingCache::new(wider, CacheConfig::at_path(&path));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_snapshot_from_model_encoder_is_discarded_by_mock() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILENAME);

        let store = SnapshotStore::new(path.clone());
        let snapshot = CacheSnapshot::new(
            "bert:0123456789abcdef",
            DIM,
            vec![SnapshotEntry {
                key: hash_text("a"),
                vector: vec![0.0; DIM],
            }],
        );
        store.save(&snapshot).expect("save");

        let offline: Arc<dyn TextEncoder> =
            Arc::new(OfflineEncoder::new(DIM).expect("encoder"));
        let cache = EmbeddingCache::new(offline, CacheConfig::at_path(&path));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_snapshot_from_other_encoder_of_same_dimension_is_discarded() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILENAME);
        let stale = {
            let cache = cache_with(&mock(), CacheConfig::at_path(&path));
            cache.encode("some description", true).expect("encode")
        };

        let offline = Arc::new(OfflineEncoder::new(DIM).expect("encoder"));
        let dyn_offline: Arc<dyn TextEncoder> = offline.clone();
        let cache = EmbeddingCache::new(dyn_offline, CacheConfig::at_path(&path));
        assert!(cache.is_empty());

        let fresh = cache.encode("some description", true).expect("encode");
        assert_eq!(fresh, offline.embed("some description"));
        assert_ne!(fresh, stale);
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("cache.rkyv");

        let cache = cache_with(&mock(), CacheConfig::at_path(&path));
        cache.encode("a", true).expect("encode");
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_does_not_fail_encode() {
        let dir = TempDir::new().expect("tempdir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").expect("write");
        let path = blocker.join("cache.rkyv");

        let encoder = mock();
        let cache = cache_with(&encoder, CacheConfig::at_path(&path));
        let result = cache.encode("still works", true);

        assert!(result.is_ok());
        assert!(cache.contains("still works"));
        assert!(cache.persist().is_err());
    }
}

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_store_load_missing_file() {
        let dir = TempDir::new().expect("tempdir");
        let store = SnapshotStore::new(dir.path().join("absent.rkyv"));
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = TempDir::new().expect("tempdir");
        let store = SnapshotStore::new(dir.path().join("snap.rkyv"));
        let snapshot = CacheSnapshot::new(
            "offline",
            3,
            vec![SnapshotEntry {
                key: hash_text("k"),
                vector: vec![0.25, -0.5, 1.0],
            }],
        );

        let written = store.save(&snapshot).expect("save");
        assert!(written > 0);
        assert_eq!(store.load().expect("load"), Some(snapshot));
    }

    #[test]
    fn test_check_compatible_version() {
        let mut snapshot = CacheSnapshot::new("offline", 3, vec![]);
        snapshot.version = CACHE_SNAPSHOT_VERSION + 1;
        let err = snapshot
            .check_compatible(std::path::Path::new("x"), "offline", 3)
            .expect_err("version mismatch");
        assert!(matches!(err, CacheError::Incompatible { .. }));
    }

    #[test]
    fn test_check_compatible_encoder_identity() {
        let snapshot = CacheSnapshot::new("bert:aaaa", 3, vec![]);
        let path = std::path::Path::new("x");

        assert!(snapshot.check_compatible(path, "bert:aaaa", 3).is_ok());
        assert!(matches!(
            snapshot.check_compatible(path, "bert:bbbb", 3),
            Err(CacheError::Incompatible { .. })
        ));
    }

    #[test]
    fn test_check_compatible_entry_width() {
        let snapshot = CacheSnapshot::new(
            "offline",
            3,
            vec![SnapshotEntry {
                key: hash_text("k"),
                vector: vec![1.0],
            }],
        );
        assert!(
            snapshot
                .check_compatible(std::path::Path::new("x"), "offline", 3)
                .is_err()
        );
    }
}
