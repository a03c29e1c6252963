//! Duplicate detection module.
//!
//! This module folds the walker's path sequence through the hasher,
//! maintains the per-run digest index, and emits duplicate pairs in
//! traversal order.

pub mod detector;

pub use detector::{Detector, DuplicatePair, ScanSummary};
