//! Scan observation and progress reporting using indicatif.
//!
//! The scan core never talks to the terminal directly. It reports through
//! the [`ScanObserver`] trait, and the display side decides what to do
//! with those events. [`Spinner`] renders an indicatif spinner whose
//! steady tick runs on a background thread with no data dependency on the
//! scan; it is stopped and cleared before final results are printed.
//! [`NullObserver`] discards everything except log output and is used in
//! quiet mode and in tests.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::duplicates::ScanSummary;

/// Observer for scan lifecycle events.
///
/// Implement this trait to receive progress updates and non-fatal
/// warnings during a scan. Warnings routed here are the only user-facing
/// channel for recoverable I/O problems; they must not abort the scan.
pub trait ScanObserver: Send + Sync {
    /// Called once before traversal begins.
    fn on_scan_start(&self);

    /// Called for each path visited, after it has been processed.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of paths visited so far (1-based)
    /// * `path` - Path just processed
    fn on_file(&self, _count: usize, _path: &Path) {}

    /// Called for each non-fatal problem (unreadable file or directory).
    fn on_warning(&self, message: &str);

    /// Called once when traversal ends, successfully or interrupted.
    fn on_scan_end(&self, _summary: &ScanSummary) {}
}

/// Indicatif spinner observer for interactive runs.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a spinner with a steady background tick.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        Self { bar }
    }

    /// Stop the background tick and clear the spinner line.
    ///
    /// Must be called before final results are printed so the tick thread
    /// no longer owns the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for Spinner {
    fn on_scan_start(&self) {
        self.bar.set_message("Searching for duplicates");
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_file(&self, count: usize, path: &Path) {
        self.bar.set_position(count as u64);
        if let Some(name) = path.file_name() {
            self.bar
                .set_message(format!("Searching: {}", name.to_string_lossy()));
        }
    }

    fn on_warning(&self, message: &str) {
        // suspend() keeps the warning line from being overdrawn by the tick.
        self.bar.suspend(|| {
            use yansi::Paint;
            eprintln!("{} {}", "warning:".yellow().bold(), message.dim());
        });
        log::warn!("{}", message);
    }

    fn on_scan_end(&self, _summary: &ScanSummary) {
        self.finish();
    }
}

/// Observer that reports nothing to the terminal.
///
/// Warnings still reach the log so `--quiet -v` combinations and tests
/// retain visibility.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ScanObserver for NullObserver {
    fn on_scan_start(&self) {}

    fn on_warning(&self, message: &str) {
        log::warn!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        warnings: AtomicUsize,
    }

    impl ScanObserver for CountingObserver {
        fn on_scan_start(&self) {}

        fn on_warning(&self, _message: &str) {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_observer_default_hooks_are_optional() {
        let obs = CountingObserver {
            warnings: AtomicUsize::new(0),
        };
        obs.on_scan_start();
        obs.on_file(1, Path::new("/tmp/x"));
        obs.on_warning("problem");
        obs.on_scan_end(&ScanSummary::default());

        assert_eq!(obs.warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_null_observer_is_silent() {
        let obs = NullObserver;
        obs.on_scan_start();
        obs.on_file(1, Path::new("/tmp/x"));
        obs.on_warning("ignored");
        obs.on_scan_end(&ScanSummary::default());
    }

    #[test]
    fn test_spinner_finish_is_idempotent() {
        let spinner = Spinner::new();
        spinner.finish();
        spinner.finish();
    }
}
