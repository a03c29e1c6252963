//! Removal decision policies.
//!
//! The detection/removal core never reads the terminal. It asks an
//! injected [`DecisionPolicy`] whether to act on each pair, which keeps
//! the pipeline testable and makes `--auto` a policy swap rather than a
//! control-flow branch.

use std::io::{self, BufRead, Write};

use yansi::Paint;

use crate::duplicates::DuplicatePair;

/// A yes/no decision source, consulted once per duplicate pair.
pub trait DecisionPolicy {
    /// Decide whether the duplicate in `pair` should be removed.
    fn confirm(&self, pair: &DuplicatePair) -> bool;
}

/// Policy for `--auto`: every detected duplicate is acted on immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoApprove;

impl DecisionPolicy for AutoApprove {
    fn confirm(&self, _pair: &DuplicatePair) -> bool {
        true
    }
}

/// Interactive stdin prompt, defaulting to "no".
///
/// Prints a red warning before asking, as removal affects real files.
/// Anything other than an explicit `y`/`yes` declines; so does EOF, which
/// keeps an accidentally-detached stdin from approving removals.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl DecisionPolicy for StdinPrompt {
    fn confirm(&self, _pair: &DuplicatePair) -> bool {
        println!(
            "{}",
            "WARNING: Removing files can affect system behavior. Be sure!"
                .red()
                .bold()
        );
        print!("{} ", "Remove this duplicate? [y/N]:".bold());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// Interpret a typed answer; only an explicit yes approves.
fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dummy_pair() -> DuplicatePair {
        DuplicatePair {
            original: PathBuf::from("/a"),
            duplicate: PathBuf::from("/b"),
        }
    }

    #[test]
    fn test_auto_approve_always_yes() {
        assert!(AutoApprove.confirm(&dummy_pair()));
    }

    #[test]
    fn test_parse_answer_accepts_yes_variants() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("Y\n"));
        assert!(parse_answer("yes\n"));
        assert!(parse_answer("  YES  \n"));
    }

    #[test]
    fn test_parse_answer_defaults_to_no() {
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("n\n"));
        assert!(!parse_answer("nope\n"));
        assert!(!parse_answer("maybe\n"));
    }
}
