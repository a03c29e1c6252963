//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Deterministic directory walking (sorted, single pass)
//! - Streaming content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming, with exclusion rules)
//!
//! # Example
//!
//! ```no_run
//! use duplicut::scanner::{Hasher, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), true);
//! let hasher = Hasher::new();
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => match hasher.hash(&path) {
//!             Ok(Some(_digest)) => println!("{}: hashed", path.display()),
//!             Ok(None) => {} // excluded or not a regular file
//!             Err(e) => eprintln!("Warning: {}", e),
//!         },
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{digest_to_hex, Hasher, BLOCK_SIZE};
pub use walker::Walker;

/// A 256-bit content digest (BLAKE3 output).
///
/// Two files with equal digests are treated as identical content.
pub type Digest = [u8; 32];

/// Errors that can occur during directory traversal.
#[derive(thiserror::Error, Debug)]
pub enum WalkError {
    /// Permission was denied when reading a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while traversing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
///
/// These cover the recoverable conditions: every variant is surfaced as a
/// warning by the caller and the affected file is excluded for the run.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
