//! Duplicate detector: digest index and pair emission.
//!
//! # Overview
//!
//! The detector consumes paths in traversal order, computes a content
//! digest for each, and keeps a digest → first-path index that is rebuilt
//! from empty on every call. The first file observed with a digest is
//! retained as the *original*; every later file with the same digest is
//! emitted as a [`DuplicatePair`] with the current path on the duplicate
//! side. Which copy counts as original is therefore purely a function of
//! traversal order.
//!
//! Files without a digest (excluded, non-regular, unreadable) never enter
//! the index and never appear in a pair on either side. Equal digests are
//! trusted as content equality; there is no byte-for-byte recheck.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::progress::ScanObserver;
use crate::scanner::{digest_to_hex, Digest, Hasher, WalkError};

/// An (original, duplicate) pair emitted once per redundant file.
///
/// Produced by the detector and consumed immediately by the removal
/// decision flow; the duplicate side is the removal candidate and the
/// original side is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    /// First-encountered file bearing this content digest.
    pub original: PathBuf,
    /// Subsequently encountered file with identical content.
    pub duplicate: PathBuf,
}

/// Statistics from one scan invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Paths yielded by the walker (files and directories).
    pub entries_seen: usize,
    /// Files that produced a content digest.
    pub files_hashed: usize,
    /// Paths excluded without a digest (non-regular, hidden under home).
    pub files_excluded: usize,
    /// Non-fatal problems surfaced as warnings (unreadable files or dirs).
    pub warnings: usize,
    /// Duplicate pairs emitted.
    pub duplicates: usize,
    /// Whether the scan was cut short by a shutdown request.
    pub interrupted: bool,
}

/// Duplicate detector folding a path sequence through the hasher.
///
/// # Example
///
/// ```no_run
/// use duplicut::duplicates::Detector;
/// use duplicut::progress::NullObserver;
/// use duplicut::scanner::{Hasher, Walker};
/// use std::path::Path;
///
/// let walker = Walker::new(Path::new("."), true);
/// let detector = Detector::new(Hasher::new());
/// let (pairs, summary) = detector.detect(walker.walk(), &NullObserver);
/// println!("{} duplicates in {} entries", pairs.len(), summary.entries_seen);
/// ```
#[derive(Debug)]
pub struct Detector {
    hasher: Hasher,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Detector {
    /// Create a detector using the given hasher.
    #[must_use]
    pub fn new(hasher: Hasher) -> Self {
        Self {
            hasher,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Detect duplicate files in a path sequence.
    ///
    /// Consumes paths strictly in the order the iterator yields them; the
    /// digest index starts empty and is discarded when this call returns,
    /// so nothing persists between runs. Walker errors and unreadable
    /// files are routed to the observer's warning hook and skipped; they
    /// never abort the scan.
    ///
    /// Returns emitted pairs in traversal order together with the scan
    /// summary.
    pub fn detect<I>(&self, paths: I, observer: &dyn ScanObserver) -> (Vec<DuplicatePair>, ScanSummary)
    where
        I: IntoIterator<Item = Result<PathBuf, WalkError>>,
    {
        let mut index: HashMap<Digest, PathBuf> = HashMap::new();
        let mut pairs = Vec::new();
        let mut summary = ScanSummary::default();

        observer.on_scan_start();

        for entry in paths {
            if self.is_shutdown_requested() {
                summary.interrupted = true;
                break;
            }

            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    summary.warnings += 1;
                    observer.on_warning(&format!("Could not read directory entry: {e}"));
                    continue;
                }
            };

            summary.entries_seen += 1;
            observer.on_file(summary.entries_seen, &path);

            let digest = match self.hasher.hash(&path) {
                Ok(Some(digest)) => digest,
                Ok(None) => {
                    summary.files_excluded += 1;
                    continue;
                }
                Err(e) => {
                    summary.warnings += 1;
                    observer.on_warning(&format!("Could not read file {}", e.path().display()));
                    continue;
                }
            };

            summary.files_hashed += 1;

            match index.get(&digest) {
                Some(original) => {
                    log::debug!(
                        "Duplicate ({}): {} == {}",
                        digest_to_hex(&digest),
                        original.display(),
                        path.display()
                    );
                    summary.duplicates += 1;
                    pairs.push(DuplicatePair {
                        original: original.clone(),
                        duplicate: path,
                    });
                }
                None => {
                    index.insert(digest, path);
                }
            }
        }

        observer.on_scan_end(&summary);

        log::info!(
            "Scan complete: {} entries, {} hashed, {} duplicates, {} warnings",
            summary.entries_seen,
            summary.files_hashed,
            summary.duplicates,
            summary.warnings
        );

        (pairs, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullObserver;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    fn detect_paths(paths: Vec<PathBuf>) -> (Vec<DuplicatePair>, ScanSummary) {
        let detector = Detector::new(Hasher::new());
        detector.detect(paths.into_iter().map(Ok), &NullObserver)
    }

    #[test]
    fn test_first_seen_is_original() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");

        let (pairs, summary) = detect_paths(vec![a.clone(), b.clone()]);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].original, a);
        assert_eq!(pairs[0].duplicate, b);
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn test_original_side_follows_traversal_order() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");

        // Reverse the order: now b is seen first, so b is the original.
        let (pairs, _) = detect_paths(vec![b.clone(), a.clone()]);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].original, b);
        assert_eq!(pairs[0].duplicate, a);
    }

    #[test]
    fn test_one_pair_per_redundant_copy() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");
        let c = write_file(&dir, "c.txt", b"same");

        let (pairs, _) = detect_paths(vec![a.clone(), b.clone(), c.clone()]);

        // Every later copy pairs against the first-seen original.
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].original, a);
        assert_eq!(pairs[0].duplicate, b);
        assert_eq!(pairs[1].original, a);
        assert_eq!(pairs[1].duplicate, c);
    }

    #[test]
    fn test_unique_content_emits_nothing() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"one");
        let b = write_file(&dir, "b.txt", b"two");

        let (pairs, summary) = detect_paths(vec![a, b]);

        assert!(pairs.is_empty());
        assert_eq!(summary.files_hashed, 2);
        assert_eq!(summary.duplicates, 0);
    }

    #[test]
    fn test_directories_excluded_not_warned() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let a = write_file(&dir, "a.txt", b"data");

        let (pairs, summary) = detect_paths(vec![sub, a]);

        assert!(pairs.is_empty());
        assert_eq!(summary.files_excluded, 1);
        assert_eq!(summary.warnings, 0);
    }

    #[test]
    fn test_walker_errors_become_warnings() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");

        let entries = vec![
            Ok(a.clone()),
            Err(WalkError::PermissionDenied(PathBuf::from("/locked"))),
            Ok(b.clone()),
        ];
        let detector = Detector::new(Hasher::new());
        let (pairs, summary) = detector.detect(entries, &NullObserver);

        // The scan continues past the error and still finds the pair.
        assert_eq!(pairs.len(), 1);
        assert_eq!(summary.warnings, 1);
    }

    #[test]
    fn test_excluded_dotfile_never_in_a_pair() {
        let home = TempDir::new().unwrap();
        let dot = write_file(&home, ".profile", b"identical");
        let plain = write_file(&home, "copy.txt", b"identical");

        let detector = Detector::new(Hasher::new().with_home_dir(home.path()));
        let (pairs, summary) =
            detector.detect(vec![Ok(dot.clone()), Ok(plain.clone())], &NullObserver);

        // The dotfile is excluded, so the plain file has no partner.
        assert!(pairs.is_empty());
        assert_eq!(summary.files_excluded, 1);
        assert_eq!(summary.files_hashed, 1);
    }

    #[test]
    fn test_index_is_rebuilt_between_runs() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");

        let detector = Detector::new(Hasher::new());
        let (first, _) = detector.detect(vec![Ok(a.clone()), Ok(b.clone())], &NullObserver);
        let (second, _) = detector.detect(vec![Ok(a.clone()), Ok(b.clone())], &NullObserver);

        // A fresh index means the second run reports the same single pair,
        // not a pair against state left over from the first run.
        assert_eq!(first, second);
    }

    #[test]
    fn test_shutdown_flag_interrupts_scan() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same");
        let b = write_file(&dir, "b.txt", b"same");

        let flag = Arc::new(AtomicBool::new(true));
        let detector = Detector::new(Hasher::new()).with_shutdown_flag(flag);
        let (pairs, summary) = detector.detect(vec![Ok(a), Ok(b)], &NullObserver);

        assert!(pairs.is_empty());
        assert!(summary.interrupted);
    }
}
