//! Command-line interface definitions for Duplicut.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and confirm each removal interactively
//! duplicut ~/Downloads
//!
//! # Unattended: act on every duplicate, moving them to trash
//! duplicut ~/Downloads --auto --trash
//!
//! # Only the top-level directory, verbose logging
//! duplicut -v ~/Downloads --no-recursion
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Duplicate file finder that removes redundant copies safely.
///
/// Duplicut hashes file contents (BLAKE3), pairs byte-identical files in
/// traversal order, and removes the redundant copies permanently or to a
/// per-user trash directory.
#[derive(Debug, Parser)]
#[command(name = "duplicut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Auto-remove duplicates without asking
    #[arg(long)]
    pub auto: bool,

    /// Move duplicates to trash instead of permanent delete
    #[arg(long)]
    pub trash: bool,

    /// Only scan files in the top-level directory
    #[arg(long)]
    pub no_recursion: bool,

    /// Override the trash directory (default: ~/.local/share/Trash/files)
    #[arg(long, value_name = "PATH")]
    pub trash_dir: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}
