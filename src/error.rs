//! Exit codes for the Duplicut process.

/// Exit codes for the Duplicut application.
///
/// - 0: Success (scan completed, whether or not duplicates were found;
///   individual removal failures are reported, not fatal)
/// - 1: General error (invalid root directory or unexpected failure)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed normally.
    Success = 0,
    /// An unexpected or fatal startup error occurred.
    GeneralError = 1,
    /// Scan was interrupted by the user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }
}
