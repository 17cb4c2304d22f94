//! Web-to-APK build service.
//!
//! Accepts an app name, a website URL and an optional icon over HTTP,
//! generates a minimal Android WebView project, runs the external packaging
//! and signing tools, and returns the signed APK to the caller.
//!
//! The crate can be used as a library: construct a
//! [`pipeline::BuildPipeline`] from a [`config::BuildConfig`] and call
//! [`pipeline::BuildPipeline::build`] directly, or mount
//! [`server::create_router`] inside another axum application.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;

// Re-export commonly used types
pub use config::{BuildConfig, Config, ServerConfig};
pub use error::{AppError, Result};
pub use pipeline::{BuildOutcome, BuildPipeline, BuildRequest};
