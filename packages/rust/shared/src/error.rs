//! Error types for invtag.
//!
//! Library crates use [`InvtagError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all invtag operations.
#[derive(Debug, thiserror::Error)]
pub enum InvtagError {
    /// A required input file does not exist.
    #[error("file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// None of the expected anchor columns is present in the table header.
    #[error("no anchor column in {path:?}: expected one of {candidates:?}")]
    InvalidSchema {
        path: PathBuf,
        candidates: Vec<String>,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InvtagError>;

impl InvtagError {
    /// Create a not-found error for a missing input file.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid-schema error naming the anchor candidates that were tried.
    pub fn invalid_schema(path: impl Into<PathBuf>, candidates: &[&str]) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = InvtagError::not_found("missing.csv");
        assert_eq!(err.to_string(), "file not found: \"missing.csv\"");

        let err = InvtagError::invalid_schema("020_all.csv", &["CMDB Status"]);
        assert!(err.to_string().contains("CMDB Status"));
        assert!(err.to_string().contains("020_all.csv"));
    }
}
