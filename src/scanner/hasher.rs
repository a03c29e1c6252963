//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of file contents using memory-efficient streaming: files are read in
//! [`BLOCK_SIZE`] chunks, so arbitrarily large files never need to fit in
//! memory.
//!
//! # Exclusion rules
//!
//! Two classes of paths yield no digest at all (`Ok(None)`):
//! - Hidden files (base name starting with `.`) that live under the user's
//!   home directory. Dotfiles are user configuration; treating them as
//!   dedup candidates risks deleting config that happens to match another
//!   file byte-for-byte.
//! - Anything that is not a regular file: directories, sockets, vanished
//!   files, broken symlinks.
//!
//! I/O failures while reading (permission denied, file disappearing
//! mid-read) are returned as [`HashError`] so the caller can warn and
//! continue the scan.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use super::{Digest, HashError};

/// Read block size for streaming hashing (64 KiB).
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Streaming content hasher with file-selection exclusions.
///
/// # Example
///
/// ```no_run
/// use duplicut::scanner::Hasher;
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// match hasher.hash(Path::new("report.pdf")) {
///     Ok(Some(digest)) => println!("digest: {}", duplicut::scanner::digest_to_hex(&digest)),
///     Ok(None) => println!("excluded"),
///     Err(e) => eprintln!("warning: {}", e),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Hasher {
    /// Home directory used for the hidden-file exclusion rule.
    home: Option<PathBuf>,
}

impl Hasher {
    /// Create a hasher using the current user's home directory for the
    /// hidden-file exclusion rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
        }
    }

    /// Override the home directory used by the hidden-file exclusion rule.
    ///
    /// Primarily useful in tests, where the "home" is a temp directory.
    #[must_use]
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Compute the content digest of a file.
    ///
    /// Returns `Ok(None)` for excluded paths: hidden files under the home
    /// directory, and anything that is not a regular file. Returns
    /// `Err(HashError)` when the file exists but cannot be read; callers
    /// treat that as a non-fatal warning.
    ///
    /// # Errors
    ///
    /// [`HashError::PermissionDenied`] or [`HashError::Io`] when opening or
    /// reading the file fails.
    pub fn hash(&self, path: &Path) -> Result<Option<Digest>, HashError> {
        if self.is_protected_dotfile(path) {
            log::debug!("Skipping hidden file under home: {}", path.display());
            return Ok(None);
        }

        // fs::metadata follows symlinks, so a broken symlink reports
        // NotFound and a symlink to a directory reports !is_file().
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::map_io_error(path, e)),
        }

        let mut file = File::open(path).map_err(|e| Self::map_io_error(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; BLOCK_SIZE];

        loop {
            let n = file.read(&mut buf).map_err(|e| Self::map_io_error(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(Some(*hasher.finalize().as_bytes()))
    }

    /// Check whether a path is a hidden file under the home directory.
    fn is_protected_dotfile(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if !hidden {
            return false;
        }

        let Some(home) = self.home.as_deref() else {
            return false;
        };

        // Compare absolute forms so relative scan roots still match.
        std::path::absolute(path)
            .map(|abs| abs.starts_with(home))
            .unwrap_or(false)
    }

    /// Map an I/O error to the corresponding [`HashError`].
    fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
        match error.kind() {
            ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
            _ => HashError::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a digest as lowercase hex for display and logging.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
