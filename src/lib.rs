//! Duplicut - Duplicate File Finder
//!
//! A cross-platform Rust CLI application for finding files with
//! byte-identical contents (BLAKE3 content hashing) and removing the
//! redundant copies, permanently or to a per-user trash directory.

pub mod actions;
pub mod app;
pub mod cli;
pub mod confirm;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;
pub mod signal;

pub use app::run_app;
