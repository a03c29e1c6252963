//! File actions module.
//!
//! Removal of duplicate files, either permanently or by relocation to a
//! per-user trash directory. The decision to act is supplied by the
//! caller; this module only executes it and reports the outcome.

pub mod remove;

pub use remove::{default_trash_dir, RemovalMode, RemovalOutcome, Remover};
