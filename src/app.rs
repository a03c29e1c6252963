//! Application orchestration: wire CLI arguments to the scan pipeline.
//!
//! Control flow: validate the root (fatal if invalid), walk + detect with
//! an injected observer, then for each emitted pair consult the decision
//! policy and hand the pair to the removal executor. Individual removal
//! failures are reported and the run continues; only the invalid-root
//! startup error is fatal.

use std::fs;

use anyhow::{bail, Context, Result};
use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::{RemovalMode, RemovalOutcome, Remover};
use crate::cli::Cli;
use crate::confirm::{AutoApprove, DecisionPolicy, StdinPrompt};
use crate::duplicates::Detector;
use crate::error::ExitCode;
use crate::progress::{NullObserver, ScanObserver, Spinner};
use crate::scanner::{Hasher, Walker};
use crate::signal::{self, ShutdownHandler};

/// Run the application with parsed CLI arguments.
///
/// # Errors
///
/// Returns an error only for the fatal startup condition: the scan root
/// does not exist or is not a directory.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    crate::logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let root = &cli.directory;
    let meta = fs::metadata(root)
        .with_context(|| format!("cannot scan {}: directory not found", root.display()))?;
    if !meta.is_dir() {
        bail!("cannot scan {}: not a directory", root.display());
    }

    // If a handler is already installed (e.g. when embedded), keep going
    // with a manual one; Ctrl+C then falls back to default behavior.
    let shutdown = signal::install_handler().unwrap_or_else(|e| {
        log::debug!("Signal handler not installed: {}", e);
        ShutdownHandler::new()
    });

    if !cli.quiet {
        println!(
            "{}",
            "─────────────────────── Duplicut ───────────────────────"
                .cyan()
                .bold()
        );
        println!(
            "Scanning {} ({}, {})\n",
            root.display().bold(),
            if cli.no_recursion {
                "top level only"
            } else {
                "recursive"
            },
            if cli.trash { "trash" } else { "permanent delete" },
        );
    }

    let observer: Box<dyn ScanObserver> = if cli.quiet {
        Box::new(NullObserver)
    } else {
        Box::new(Spinner::new())
    };

    let walker =
        Walker::new(root, !cli.no_recursion).with_shutdown_flag(shutdown.get_flag());
    let detector = Detector::new(Hasher::new()).with_shutdown_flag(shutdown.get_flag());

    let (pairs, summary) = detector.detect(walker.walk(), observer.as_ref());

    if summary.interrupted {
        return Ok(ExitCode::Interrupted);
    }

    if pairs.is_empty() {
        if !cli.quiet {
            println!("{}", "No duplicates found!".green().bold());
            print_footer();
        }
        return Ok(ExitCode::Success);
    }

    let mut remover = Remover::new(if cli.trash {
        RemovalMode::Trash
    } else {
        RemovalMode::Permanent
    });
    if let Some(dir) = &cli.trash_dir {
        remover = remover.with_trash_dir(dir);
    }

    let policy: Box<dyn DecisionPolicy> = if cli.auto {
        Box::new(AutoApprove)
    } else {
        Box::new(StdinPrompt)
    };

    let mut removed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut bytes_reclaimed = 0u64;

    for pair in &pairs {
        if shutdown.is_shutdown_requested() {
            return Ok(ExitCode::Interrupted);
        }

        if !cli.quiet {
            println!(
                "Duplicate -> {} == {}",
                pair.original.display().bold(),
                pair.duplicate.display().bold()
            );
        }

        let outcome = if policy.confirm(pair) {
            remover.remove(pair)
        } else {
            RemovalOutcome::Skipped
        };

        bytes_reclaimed += outcome.bytes_reclaimed();
        match &outcome {
            RemovalOutcome::Deleted { .. } => {
                removed += 1;
                if !cli.quiet {
                    println!("{}\n", "Removed permanently".red().bold());
                }
            }
            RemovalOutcome::MovedToTrash { target, .. } => {
                removed += 1;
                if !cli.quiet {
                    println!(
                        "{} ({})\n",
                        "Moved to Trash".blue().bold(),
                        target.display().dim()
                    );
                }
            }
            RemovalOutcome::Skipped => {
                skipped += 1;
                if !cli.quiet {
                    println!("{}\n", "Skipped".dim());
                }
            }
            RemovalOutcome::Failed { reason } => {
                failed += 1;
                if !cli.quiet {
                    println!("{} {}\n", "Could not remove:".red().bold(), reason);
                }
            }
        }
    }

    if !cli.quiet {
        println!(
            "{} duplicate(s): {} removed ({} freed), {} skipped, {} failed",
            pairs.len(),
            removed,
            ByteSize::b(bytes_reclaimed),
            skipped,
            failed
        );
        print_footer();
    }

    // Removal failures are reported, not fatal.
    Ok(ExitCode::Success)
}

fn print_footer() {
    println!(
        "{}",
        "───────────────── EXITING ─────────────────".cyan().bold()
    );
}
