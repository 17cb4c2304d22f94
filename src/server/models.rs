//! API response models.

use serde::Serialize;

/// Error payload returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error category plus diagnostic text (tool stderr verbatim for
    /// packaging/signing failures).
    pub error: String,
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is reachable.
    pub status: &'static str,

    /// Crate version.
    pub version: &'static str,
}
