//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected error, cache I/O failure |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Page does not exist upstream (live or cached) |
//! | 5 | `Network` | Transport failure or unsuccessful HTTP status |
//! | 6 | `Timeout` | Request timed out |
//! | 130 | `Cancelled` | Interrupted with Ctrl-C |
//!
//! ```bash
//! docfetch fetch System.Nope -p netcore -f net6.0
//! case $? in
//!     0) echo "fetched" ;;
//!     3) echo "no such page" ;;
//!     *) echo "failed" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// Requested page does not exist (exit code 3).
    NotFound = 3,

    /// Network or HTTP failure (exit code 5).
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,

    /// Interrupted by the user (exit code 130, as for SIGINT).
    Cancelled = 130,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        }
    }

    /// Categorise a library error.
    #[must_use]
    pub fn from_core(err: &docfetch_core::Error) -> Self {
        use docfetch_core::Error;

        match err {
            Error::NotFound { .. } => Self::NotFound,
            Error::Network(e) if e.is_timeout() => Self::Timeout,
            Error::Network(_) | Error::RequestFailed { .. } => Self::Network,
            Error::Cancelled { .. } => Self::Cancelled,
            Error::Config(_) | Error::InvalidUrl(_) => Self::Usage,
            Error::Io(_) | Error::Storage { .. } => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An error with an explicit category.
#[derive(Debug)]
pub struct CliError {
    category: ErrorCategory,
    source: anyhow::Error,
}

impl CliError {
    /// Wrap `source` with `category`.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Convenience constructor for usage errors.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// The category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Determine the category of an error bubbling out of `main`.
///
/// Explicit [`CliError`]s win; otherwise the first library error in the
/// chain decides; anything else is internal.
pub fn category_from_error(err: &anyhow::Error) -> ErrorCategory {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.category();
    }

    err.chain()
        .find_map(|cause| cause.downcast_ref::<docfetch_core::Error>())
        .map_or(ErrorCategory::Internal, ErrorCategory::from_core)
}
