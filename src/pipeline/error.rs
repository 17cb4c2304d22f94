//! Error types for the build pipeline.
//!
//! One variant per failure category; every pipeline failure is terminal for
//! the request that hit it and is surfaced to the HTTP boundary unchanged.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories of a single build request.
#[derive(Error, Debug)]
pub enum Error {
    /// Request rejected before any side effect (missing field, bad icon).
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was missing or malformed
        reason: String,
    },

    /// App name produced an identifier unsafe for paths or process arguments.
    #[error("invalid app name {value:?}: {reason}")]
    InvalidIdentifier {
        /// The offending input
        value: String,
        /// Which rule it violated
        reason: &'static str,
    },

    /// Directory or file operation failed.
    #[error("storage error while {action} at {path}: {source}")]
    Storage {
        /// What the pipeline was doing
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// Artifact template failed to register or render.
    #[error("template error: {0}")]
    Template(String),

    /// Packaging tool exited non-zero, failed to start, or timed out.
    #[error("packaging tool failed: {stderr}")]
    Packaging {
        /// Captured standard-error text, verbatim
        stderr: String,
    },

    /// Signing tool exited non-zero, failed to start, or timed out.
    #[error("signing tool failed: {stderr}")]
    Signing {
        /// Captured standard-error text, verbatim
        stderr: String,
    },
}

impl Error {
    /// Whether the caller can fix this by resubmitting with corrected input.
    ///
    /// Drives the HTTP status mapping: client errors become 400, everything
    /// else becomes 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest { .. } | Error::InvalidIdentifier { .. }
        )
    }
}

/// Extension trait attaching action + path context to filesystem results.
pub trait ErrorExt<T> {
    /// Map an IO failure into [`Error::Storage`] with the given context.
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Storage {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
