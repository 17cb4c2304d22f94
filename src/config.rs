//! Service configuration.
//!
//! Everything the original hard-coded (port, output root, tool names, key
//! store and password) lives in one explicit structure, loadable from a TOML
//! file. Defaults reproduce the historical constants so a bare deployment
//! behaves like the original service.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration: HTTP listener plus build pipeline settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Build pipeline settings.
    pub build: BuildConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

/// Build pipeline settings, passed to [`crate::pipeline::BuildPipeline`] at
/// construction time.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root under which per-slug project directories are created.
    pub output_root: PathBuf,

    /// Packaging tool executable (name resolved via PATH, or absolute path).
    pub packaging_tool: PathBuf,

    /// Signing tool executable.
    pub signing_tool: PathBuf,

    /// Key store handed to the signing tool.
    pub key_store: PathBuf,

    /// Key store password handed to the signing tool.
    pub key_store_password: String,

    /// Wall-clock bound for each child process, in seconds.
    ///
    /// Unset means no bound: a hung tool hangs the request, matching the
    /// historical behavior.
    pub process_timeout_secs: Option<u64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
            packaging_tool: PathBuf::from("apktool"),
            signing_tool: PathBuf::from("apksigner"),
            key_store: PathBuf::from("my-release-key.jks"),
            key_store_password: "password".to_string(),
            process_timeout_secs: None,
        }
    }
}

impl BuildConfig {
    /// Child-process timeout as a [`Duration`], when configured.
    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfig")
            .field("output_root", &self.output_root)
            .field("packaging_tool", &self.packaging_tool)
            .field("signing_tool", &self.signing_tool)
            .field("key_store", &self.key_store)
            .field("key_store_password", &"<redacted>")
            .field("process_timeout_secs", &self.process_timeout_secs)
            .finish()
    }
}
