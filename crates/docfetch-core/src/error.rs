//! Error types and handling for docfetch-core operations.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. The variants
//! are grouped by where the failure happened:
//!
//! - **Upstream outcomes**: [`Error::NotFound`] and [`Error::RequestFailed`]
//!   are definitive answers from the documentation site.
//! - **Transport**: [`Error::Network`] and [`Error::Cancelled`] mean no answer
//!   was obtained at all.
//! - **Local**: [`Error::Io`], [`Error::Storage`] and [`Error::Config`] cover
//!   the cache directory and configuration.
//!
//! Nothing in this crate retries. [`Error::is_recoverable`] is a hint for
//! callers that want to implement their own policy:
//!
//! ```rust
//! use docfetch_core::Error;
//!
//! let err = Error::NotFound { url: "https://docs.microsoft.com/en-us/dotnet/api/Nope".into() };
//! assert!(err.is_not_found());
//! assert!(!err.is_recoverable());
//! assert_eq!(err.category(), "not_found");
//! ```

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for docfetch-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Raised when reading or writing a cache file fails for reasons other
    /// than the file being absent.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed before a response status was available.
    ///
    /// Covers DNS failures, refused connections, TLS errors and timeouts.
    /// The underlying `reqwest::Error` is preserved unchanged.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller cancelled the request while it was waiting on the network.
    #[error("Request to '{url}' was cancelled")]
    Cancelled {
        /// URL that was being fetched.
        url: String,
    },

    /// The documentation page does not exist upstream.
    ///
    /// Produced both for a live HTTP 404 and for a cached negative entry.
    #[error("Documentation page not found: {url}")]
    NotFound {
        /// URL the page was (or would have been) fetched from.
        url: String,
    },

    /// The server answered with an unsuccessful status other than 404.
    ///
    /// These responses are never cached.
    #[error("Request to '{url}' failed with HTTP {status}")]
    RequestFailed {
        /// Status code returned by the server.
        status: StatusCode,
        /// URL that was requested.
        url: String,
    },

    /// Cache storage operation failed.
    ///
    /// Used when the cache root or a per-key directory cannot be created, or
    /// when committing a cache file fails. The underlying I/O error is kept
    /// as the source.
    #[error("Storage error at '{}': {source}", .path.display())]
    Storage {
        /// File or directory the operation was acting on.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Empty locale, query key, pack name or framework moniker
    /// - Config directory cannot be determined
    #[error("Configuration error: {0}")]
    Config(String),

    /// Base URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Returns `true` for both live and cached "page does not exist" results.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error might succeed if the caller tries again later.
    ///
    /// - `true` for timeouts, connection failures and 5xx responses
    /// - `false` for not-found, client errors, cancellation and local failures
    ///
    /// ```rust
    /// use docfetch_core::Error;
    /// use docfetch_core::StatusCode;
    ///
    /// let busy = Error::RequestFailed {
    ///     status: StatusCode::SERVICE_UNAVAILABLE,
    ///     url: "https://example.com".into(),
    /// };
    /// assert!(busy.is_recoverable());
    ///
    /// let forbidden = Error::RequestFailed {
    ///     status: StatusCode::FORBIDDEN,
    ///     url: "https://example.com".into(),
    /// };
    /// assert!(!forbidden.is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::RequestFailed { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            },
            Self::Io(e) | Self::Storage { source: e, .. } => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging and for mapping errors to exit codes.
    ///
    /// - `"io"` - File system operations
    /// - `"network"` - Transport failures
    /// - `"cancelled"` - Caller-requested cancellation
    /// - `"not_found"` - Page absent upstream (live or cached)
    /// - `"request_failed"` - Non-404 unsuccessful HTTP status
    /// - `"storage"` - Cache directory or commit failures
    /// - `"config"` - Configuration and input validation
    /// - `"invalid_url"` - Malformed base URL
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Cancelled { .. } => "cancelled",
            Self::NotFound { .. } => "not_found",
            Self::RequestFailed { .. } => "request_failed",
            Self::Storage { .. } => "storage",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    fn storage_error(kind: io::ErrorKind) -> Error {
        Error::Storage {
            path: PathBuf::from("/cache/netcore"),
            source: io::Error::new(kind, "disk full"),
        }
    }

    #[test]
    fn test_error_display_formatting() {
        let not_found = Error::NotFound {
            url: "https://docs.microsoft.com/en-us/dotnet/api/System.Nope?view=net6.0".into(),
        };
        let text = not_found.to_string();
        assert!(text.contains("not found"));
        assert!(text.contains("System.Nope"));

        let failed = Error::RequestFailed {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "https://example.com/page".into(),
        };
        let text = failed.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("https://example.com/page"));

        let cancelled = Error::Cancelled {
            url: "https://example.com/slow".into(),
        };
        assert!(cancelled.to_string().contains("cancelled"));

        let storage = storage_error(io::ErrorKind::Other);
        let text = storage.to_string();
        assert!(text.contains("/cache/netcore"));
        assert!(text.contains("disk full"));
        assert!(
            Error::Config("empty locale".into())
                .to_string()
                .starts_with("Configuration error")
        );
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();

        match error {
            Error::Io(ref inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied);
            },
            _ => panic!("Expected Io error variant"),
        }
        assert_eq!(error.category(), "io");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_error_from_toml_error() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("locale = ");
        let error: Error = parse.unwrap_err().into();
        assert_eq!(error.category(), "config");
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::NotFound { url: String::new() }, "not_found"),
            (
                Error::RequestFailed {
                    status: StatusCode::BAD_GATEWAY,
                    url: String::new(),
                },
                "request_failed",
            ),
            (Error::Cancelled { url: String::new() }, "cancelled"),
            (storage_error(io::ErrorKind::PermissionDenied), "storage"),
            (Error::Config(String::new()), "config"),
            (Error::InvalidUrl(String::new()), "invalid_url"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(
            Error::RequestFailed {
                status: StatusCode::BAD_GATEWAY,
                url: String::new(),
            }
            .is_recoverable()
        );
        assert!(
            Error::RequestFailed {
                status: StatusCode::TOO_MANY_REQUESTS,
                url: String::new(),
            }
            .is_recoverable()
        );
        assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());

        // A negative answer is final; retrying would not change it.
        assert!(!Error::NotFound { url: String::new() }.is_recoverable());
        assert!(!Error::Cancelled { url: String::new() }.is_recoverable());
        assert!(!Error::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_storage_error_keeps_io_source() {
        let interrupted = storage_error(io::ErrorKind::Interrupted);
        assert!(interrupted.is_recoverable());

        let denied = storage_error(io::ErrorKind::PermissionDenied);
        assert!(!denied.is_recoverable());
        let source = denied
            .source()
            .and_then(|s| s.downcast_ref::<io::Error>())
            .unwrap();
        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_is_not_found_only_matches_not_found() {
        assert!(Error::NotFound { url: String::new() }.is_not_found());
        assert!(
            !Error::RequestFailed {
                status: StatusCode::GONE,
                url: String::new(),
            }
            .is_not_found()
        );
        assert!(!storage_error(io::ErrorKind::NotFound).is_not_found());
    }
}
