//! Removal executor for duplicate files.
//!
//! # Overview
//!
//! Given a [`DuplicatePair`] and a removal mode, this module deletes or
//! relocates the duplicate path and reports the outcome. The original
//! path is never touched under any mode.
//!
//! # Safety
//!
//! - Trash mode preserves content: the duplicate is moved into a per-user
//!   trash directory, created on demand, under a collision-free name.
//! - Every filesystem error is captured as [`RemovalOutcome::Failed`];
//!   one pair's failure never aborts processing of subsequent pairs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use crate::duplicates::DuplicatePair;

/// How a duplicate should be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    /// Move the duplicate into the per-user trash directory.
    Trash,
    /// Delete the duplicate directly from the filesystem.
    Permanent,
}

/// The result of acting on one duplicate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The duplicate was permanently deleted.
    Deleted {
        /// Size of the deleted file in bytes.
        bytes: u64,
    },
    /// The duplicate was relocated into the trash directory.
    MovedToTrash {
        /// Where the file now lives.
        target: PathBuf,
        /// Size of the relocated file in bytes.
        bytes: u64,
    },
    /// The caller declined to act; the duplicate is untouched.
    Skipped,
    /// The removal attempt failed; the run continues with the next pair.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
}

impl RemovalOutcome {
    /// Bytes reclaimed by this outcome (zero unless removal succeeded).
    #[must_use]
    pub fn bytes_reclaimed(&self) -> u64 {
        match self {
            Self::Deleted { bytes } | Self::MovedToTrash { bytes, .. } => *bytes,
            Self::Skipped | Self::Failed { .. } => 0,
        }
    }
}

/// Error type for removal operations (folded into [`RemovalOutcome::Failed`]).
#[derive(Debug, Error)]
enum RemoveError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("failed to create trash directory {path}: {source}")]
    TrashDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move {path} to trash: {source}")]
    MoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to remove: duplicate and original are the same path: {0}")]
    SamePath(PathBuf),

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The fixed per-user trash location, created on demand.
///
/// Follows the freedesktop layout the original tool used:
/// `~/.local/share/Trash/files`.
#[must_use]
pub fn default_trash_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".local")
            .join("share")
            .join("Trash")
            .join("files")
    })
}

/// Removal executor for duplicate pairs.
///
/// # Example
///
/// ```no_run
/// use duplicut::actions::{RemovalMode, Remover};
/// use duplicut::duplicates::DuplicatePair;
/// use std::path::PathBuf;
///
/// let remover = Remover::new(RemovalMode::Trash);
/// let pair = DuplicatePair {
///     original: PathBuf::from("/data/a.txt"),
///     duplicate: PathBuf::from("/data/b.txt"),
/// };
/// let outcome = remover.remove(&pair);
/// println!("{:?}", outcome);
/// ```
#[derive(Debug, Clone)]
pub struct Remover {
    mode: RemovalMode,
    trash_dir: Option<PathBuf>,
}

impl Remover {
    /// Create a remover for the given mode, using the default trash
    /// directory in trash mode.
    #[must_use]
    pub fn new(mode: RemovalMode) -> Self {
        Self {
            mode,
            trash_dir: default_trash_dir(),
        }
    }

    /// Override the trash directory.
    #[must_use]
    pub fn with_trash_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.trash_dir = Some(dir.into());
        self
    }

    /// The trash directory this remover will use, if any.
    #[must_use]
    pub fn trash_dir(&self) -> Option<&Path> {
        self.trash_dir.as_deref()
    }

    /// Act on one duplicate pair.
    ///
    /// Deletes or relocates `pair.duplicate` according to the configured
    /// mode. The original path is never touched. All errors are captured
    /// as [`RemovalOutcome::Failed`] so the caller can continue with the
    /// next pair.
    #[must_use]
    pub fn remove(&self, pair: &DuplicatePair) -> RemovalOutcome {
        match self.try_remove(pair) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Removal failed for {}: {}", pair.duplicate.display(), e);
                RemovalOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_remove(&self, pair: &DuplicatePair) -> Result<RemovalOutcome, RemoveError> {
        if pair.duplicate == pair.original {
            return Err(RemoveError::SamePath(pair.duplicate.clone()));
        }

        let path = &pair.duplicate;

        // Size is captured before removal so the final report can count
        // reclaimed bytes.
        let metadata = fs::metadata(path).map_err(|e| Self::map_io_error(path, e))?;
        let bytes = metadata.len();

        match self.mode {
            RemovalMode::Permanent => {
                fs::remove_file(path).map_err(|e| Self::map_io_error(path, e))?;
                log::info!("Permanently deleted: {} ({} bytes)", path.display(), bytes);
                Ok(RemovalOutcome::Deleted { bytes })
            }
            RemovalMode::Trash => {
                let target = self.move_to_trash(path)?;
                log::info!(
                    "Moved to trash: {} -> {} ({} bytes)",
                    path.display(),
                    target.display(),
                    bytes
                );
                Ok(RemovalOutcome::MovedToTrash { target, bytes })
            }
        }
    }

    /// Relocate a file into the trash directory, creating it on demand.
    fn move_to_trash(&self, path: &Path) -> Result<PathBuf, RemoveError> {
        let trash_dir = self.trash_dir.as_deref().ok_or_else(|| RemoveError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("no trash directory available for this user"),
        })?;

        // create_dir_all is idempotent, so concurrent or repeated removals
        // cannot race on directory creation.
        fs::create_dir_all(trash_dir).map_err(|e| RemoveError::TrashDirFailed {
            path: trash_dir.to_path_buf(),
            source: e,
        })?;

        let target = Self::unique_target(trash_dir, path);

        // Rename is atomic on the same filesystem; fall back to copy +
        // delete for cross-device moves.
        if let Err(rename_err) = fs::rename(path, &target) {
            log::debug!(
                "Rename to trash failed ({}), falling back to copy: {}",
                rename_err,
                path.display()
            );
            fs::copy(path, &target).map_err(|e| RemoveError::MoveFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            fs::remove_file(path).map_err(|e| RemoveError::MoveFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        Ok(target)
    }

    /// Pick a target name in the trash directory that does not collide
    /// with anything already trashed.
    fn unique_target(trash_dir: &Path, path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map_or_else(|| "unnamed".into(), |n| n.to_os_string());

        let candidate = trash_dir.join(&name);
        if !candidate.exists() {
            return candidate;
        }

        for n in 1u32.. {
            let mut numbered = name.clone();
            numbered.push(format!(".{n}"));
            let candidate = trash_dir.join(&numbered);
            if !candidate.exists() {
                return candidate;
            }
        }
        unreachable!("u32 space exhausted for trash names")
    }

    fn map_io_error(path: &Path, error: io::Error) -> RemoveError {
        match error.kind() {
            io::ErrorKind::NotFound => RemoveError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => RemoveError::PermissionDenied(path.to_path_buf()),
            _ => RemoveError::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
