//! Property-based tests over the hashing and pairing core.

use std::fs::File;
use std::io::Write;

use duplicut::duplicates::Detector;
use duplicut::progress::NullObserver;
use duplicut::scanner::Hasher;
use proptest::prelude::*;
use tempfile::TempDir;

proptest! {
    // Filesystem-backed cases are slow; keep the case count moderate.
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Hashing an unmodified file twice yields the same digest.
    #[test]
    fn prop_hash_is_idempotent(content in proptest::collection::vec(any::<u8>(), 0..8192)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.bin");
        File::create(&path).unwrap().write_all(&content).unwrap();

        let hasher = Hasher::new();
        let first = hasher.hash(&path).unwrap().unwrap();
        let second = hasher.hash(&path).unwrap().unwrap();

        prop_assert_eq!(first, second);
    }

    /// Files with identical bytes always pair; the first-seen path is the
    /// original side.
    #[test]
    fn prop_identical_content_pairs(content in proptest::collection::vec(any::<u8>(), 0..8192)) {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        File::create(&a).unwrap().write_all(&content).unwrap();
        File::create(&b).unwrap().write_all(&content).unwrap();

        let detector = Detector::new(Hasher::new());
        let (pairs, _) = detector.detect(vec![Ok(a.clone()), Ok(b.clone())], &NullObserver);

        prop_assert_eq!(pairs.len(), 1);
        prop_assert_eq!(&pairs[0].original, &a);
        prop_assert_eq!(&pairs[0].duplicate, &b);
    }

    /// Files with different bytes never pair.
    #[test]
    fn prop_different_content_never_pairs(
        left in proptest::collection::vec(any::<u8>(), 0..4096),
        right in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        prop_assume!(left != right);

        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        File::create(&a).unwrap().write_all(&left).unwrap();
        File::create(&b).unwrap().write_all(&right).unwrap();

        let detector = Detector::new(Hasher::new());
        let (pairs, _) = detector.detect(vec![Ok(a), Ok(b)], &NullObserver);

        prop_assert!(pairs.is_empty());
    }
}
