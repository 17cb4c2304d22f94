//! Command line argument parsing.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

/// Web-to-APK build service
#[derive(Parser, Debug)]
#[command(
    name = "webtoapk",
    version,
    about = "Web-to-APK build service",
    long_about = "Serves an HTTP endpoint that wraps a website URL in a native Android WebView
project, packages it with apktool, signs it with apksigner, and returns the
signed APK for download.

Usage:
  webtoapk
  webtoapk --config webtoapk.toml
  webtoapk --listen 127.0.0.1:8080 --output-root /var/lib/webtoapk

Without --config, built-in defaults are used (listen on 0.0.0.0:3000, project
directories under ./output)."
)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "WEBTOAPK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(short, long, env = "WEBTOAPK_LISTEN", value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    /// Override the root directory for generated project directories
    #[arg(long, env = "WEBTOAPK_OUTPUT_ROOT", value_name = "DIR")]
    pub output_root: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Loads the configuration file (or defaults) and applies flag overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.server.listen = listen;
        }
        if let Some(output_root) = &self.output_root {
            config.build.output_root = output_root.clone();
        }

        Ok(config)
    }
}
