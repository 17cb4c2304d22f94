//! Crate-level error types.

use thiserror::Error;

/// Result type alias for service-level operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for server startup and operation.
///
/// Per-request build failures stay inside [`crate::pipeline::Error`]; this
/// type covers everything that can go wrong around them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading errors
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO errors (listener binding, server IO)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Build pipeline errors surfaced outside a request context
    #[error("build error: {0}")]
    Pipeline(#[from] crate::pipeline::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}
