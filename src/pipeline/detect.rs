//! External tool availability probing.
//!
//! Advisory startup check: a missing tool is logged, not fatal, since the
//! operator may install it after the server is already up. The pipeline
//! reports its own `Packaging`/`Signing` errors when a tool is genuinely
//! unavailable at build time.

use crate::config::BuildConfig;

/// Probes PATH for the configured packaging and signing tools and logs the
/// result of each lookup.
pub fn probe_tools(config: &BuildConfig) {
    for (role, tool) in [
        ("packaging", &config.packaging_tool),
        ("signing", &config.signing_tool),
    ] {
        match which::which(tool) {
            Ok(path) => log::info!("✓ {} tool available: {}", role, path.display()),
            Err(e) => log::warn!(
                "{} tool {} not found: {}. Builds will fail until it is installed.",
                role,
                tool.display(),
                e
            ),
        }
    }
}
