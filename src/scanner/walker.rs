//! Directory walker with deterministic traversal order.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating candidate
//! paths under a scan root. The walker is purely a path enumerator: it
//! never opens or hashes files, and directories are yielded alongside
//! files in flat mode (the hasher filters out non-regular entries).
//!
//! Traversal is single-threaded and sorted by file name, so "first seen"
//! is a stable, reproducible property of the tree. The collision
//! resolution in [`crate::duplicates`] depends on that ordering to decide
//! which copy is the original.
//!
//! Unreadable subdirectories do not abort the walk: they surface as `Err`
//! items and iteration continues.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::WalkError;

/// Directory walker yielding a lazy, finite, single-pass path sequence.
///
/// # Example
///
/// ```no_run
/// use duplicut::scanner::Walker;
/// use std::path::Path;
///
/// let walker = Walker::new(Path::new("/home/user/Downloads"), true);
/// for entry in walker.walk() {
///     match entry {
///         Ok(path) => println!("{}", path.display()),
///         Err(e) => eprintln!("Warning: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Descend into subdirectories when true; direct children only when false
    recursive: bool,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory to scan
    /// * `recursive` - Descend into subdirectories, or list direct children only
    #[must_use]
    pub fn new(root: &Path, recursive: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            recursive,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker ends iteration as soon
    /// as possible. This allows for clean Ctrl+C handling.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Walk the tree, yielding every entry under the root.
    ///
    /// Returns a lazy iterator of paths in sorted depth-first order.
    /// Errors (unreadable subdirectories) are yielded as [`WalkError`]
    /// values rather than stopping iteration. The root itself is not
    /// yielded.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, WalkError>> + '_ {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let shutdown = self.shutdown_flag.clone();

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .take_while(move |_| {
                let stop = shutdown
                    .as_ref()
                    .is_some_and(|f| f.load(Ordering::SeqCst));
                if stop {
                    log::debug!("Walker: shutdown requested, stopping iteration");
                }
                !stop
            })
            .map(|entry| match entry {
                Ok(entry) => Ok(entry.into_path()),
                Err(e) => Err(Self::map_walk_error(&self.root, e)),
            })
    }

    /// Convert a walkdir error into a [`WalkError`].
    fn map_walk_error(root: &Path, error: walkdir::Error) -> WalkError {
        let path = error
            .path()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

        match error.io_error().map(std::io::Error::kind) {
            Some(std::io::ErrorKind::PermissionDenied) => {
                log::warn!("Permission denied: {}", path.display());
                WalkError::PermissionDenied(path)
            }
            _ => {
                log::warn!("Walker error for {}: {}", path.display(), error);
                WalkError::Io {
                    path,
                    source: error
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk error")),
                }
            }
        }
    }
}
