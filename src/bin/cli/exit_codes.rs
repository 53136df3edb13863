//! Exit codes for the CLI tool.

use leetbox::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// A child script ran but reported failure
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Registry document could not be recognized
pub const BAD_DOCUMENT: i32 = 3;
/// Name already taken, missing, or imported elsewhere
pub const CONFLICT: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadDocument,
    Conflict,
    IoError,
    UserInterrupt,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadDocument => BAD_DOCUMENT,
            Self::Conflict => CONFLICT,
            Self::IoError => IO_ERROR,
            Self::UserInterrupt => USER_INTERRUPT,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a leetbox error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(e) if e.kind() == std::io::ErrorKind::Interrupted => ExitCode::UserInterrupt,
        Error::Io(_) => ExitCode::IoError,
        e if e.is_parse_failure() => ExitCode::BadDocument,
        e if e.is_mutation_failure() => ExitCode::Conflict,
        Error::ProblemExists { .. } | Error::VariantFileExists { .. } => ExitCode::Conflict,
        Error::InvalidName(_) => ExitCode::BadArgs,
        Error::ProblemNotFound { .. } => ExitCode::BadArgs,
        Error::ToolNotFound { .. } => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
