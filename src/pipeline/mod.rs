//! The APK build pipeline.
//!
//! One [`BuildPipeline`] instance serves the whole process. Each call to
//! [`BuildPipeline::build`] handles a single request in strict sequence:
//! derive identifiers, materialize the project directory and its generated
//! artifacts, run the packaging tool, run the signing tool, verify and
//! fingerprint the signed APK. Any failure is terminal for that request;
//! nothing is retried.

pub mod checksum;
pub mod detect;
pub mod error;
pub mod icon;
pub mod identity;
pub mod locks;
pub mod request;
pub mod templates;
pub mod tools;

pub use error::{Error, ErrorExt, Result};
pub use identity::ProjectIdentity;
pub use request::BuildRequest;
pub use tools::{CommandRunner, ToolError, ToolOutput, ToolRunner};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::BuildConfig;
use locks::SlugLocks;
use templates::ArtifactTemplates;

/// File name of the generated manifest artifact.
pub const MANIFEST_FILE_NAME: &str = "AndroidManifest.xml";

/// File name of the generated entry-point artifact.
pub const MAIN_ACTIVITY_FILE_NAME: &str = "MainActivity.java";

/// Result of one successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Identifiers derived from the requested app name.
    pub identity: ProjectIdentity,

    /// Per-build working directory.
    pub project_dir: PathBuf,

    /// Unsigned APK written by the packaging tool.
    pub unsigned_apk: PathBuf,

    /// Signed APK written by the signing tool. Guaranteed to exist and be
    /// non-empty when the build returns.
    pub signed_apk: PathBuf,

    /// Size of the signed APK in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 of the signed APK.
    pub checksum: String,
}

/// Build orchestrator.
///
/// Owns the configuration, the registered artifact templates, the process
/// runner, and the per-slug lock map. Concurrent requests for distinct app
/// names run independently; requests sharing a slug serialize.
pub struct BuildPipeline {
    config: BuildConfig,
    templates: ArtifactTemplates,
    runner: Arc<dyn ToolRunner>,
    locks: SlugLocks,
}

impl std::fmt::Debug for BuildPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BuildPipeline {
    /// Creates a pipeline that spawns real child processes.
    ///
    /// # Errors
    ///
    /// [`Error::Template`] if an artifact template fails to register.
    pub fn new(config: BuildConfig) -> Result<Self> {
        Self::with_runner(config, Arc::new(CommandRunner))
    }

    /// Creates a pipeline with an injected process runner.
    pub fn with_runner(config: BuildConfig, runner: Arc<dyn ToolRunner>) -> Result<Self> {
        Ok(Self {
            config,
            templates: ArtifactTemplates::new()?,
            runner,
            locks: SlugLocks::default(),
        })
    }

    /// Returns a reference to the pipeline configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Runs one build request through the whole pipeline.
    ///
    /// Validation, identifier derivation and icon decoding all happen before
    /// any side effect: an invalid request leaves no directory, file or
    /// process behind.
    pub async fn build(&self, request: BuildRequest) -> Result<BuildOutcome> {
        request.validate()?;
        let identity = ProjectIdentity::derive(&request.app_name)?;

        let icon_png = match &request.icon {
            Some(bytes) => Some(icon::normalize_icon(bytes)?),
            None => None,
        };

        warn_on_unparseable_url(&request.website_url);

        log::info!(
            "Building {} ({}) for {}",
            identity.slug,
            identity.package_id,
            request.website_url
        );

        // Serialize builds of the same slug; they share a project directory.
        let _guard = self.locks.acquire(&identity.slug).await;

        let project_dir = self.config.output_root.join(&identity.slug);
        let unsigned_apk = project_dir.join(identity.unsigned_apk_name());
        let signed_apk = project_dir.join(identity.signed_apk_name());

        // create_dir_all succeeds when the directory already exists, so
        // repeated builds of the same app name reuse their directory.
        tokio::fs::create_dir_all(&project_dir)
            .await
            .fs_context("creating project directory", &project_dir)?;

        let manifest = self
            .templates
            .render_manifest(&identity, &request.app_name)?;
        let manifest_path = project_dir.join(MANIFEST_FILE_NAME);
        tokio::fs::write(&manifest_path, manifest)
            .await
            .fs_context("writing manifest artifact", &manifest_path)?;

        let main_activity = self
            .templates
            .render_main_activity(&identity, &request.website_url)?;
        let activity_path = project_dir.join(MAIN_ACTIVITY_FILE_NAME);
        tokio::fs::write(&activity_path, main_activity)
            .await
            .fs_context("writing entry-point artifact", &activity_path)?;

        if let Some(png) = icon_png {
            let icon_path = project_dir.join(icon::ICON_FILE_NAME);
            tokio::fs::write(&icon_path, png)
                .await
                .fs_context("writing launcher icon", &icon_path)?;
        }

        self.run_packaging_tool(&project_dir, &unsigned_apk).await?;
        self.run_signing_tool(&unsigned_apk, &signed_apk).await?;

        let (size, checksum) = self.verify_signed_apk(&signed_apk).await?;
        log::info!(
            "✓ Signed APK: {} ({} bytes, sha256 {})",
            signed_apk.display(),
            size,
            checksum
        );

        Ok(BuildOutcome {
            identity,
            project_dir,
            unsigned_apk,
            signed_apk,
            size,
            checksum,
        })
    }

    /// Invokes the packaging tool: `<tool> b <project_dir> -o <unsigned>`.
    async fn run_packaging_tool(&self, project_dir: &Path, unsigned_apk: &Path) -> Result<()> {
        let args = [
            OsString::from("b"),
            project_dir.as_os_str().to_os_string(),
            OsString::from("-o"),
            unsigned_apk.as_os_str().to_os_string(),
        ];

        let output = self
            .runner
            .run(
                &self.config.packaging_tool,
                &args,
                self.config.process_timeout(),
            )
            .await
            .map_err(|e| Error::Packaging {
                stderr: e.to_string(),
            })?;

        if !output.success {
            log::warn!(
                "Packaging tool exited with code {:?} for {}",
                output.code,
                project_dir.display()
            );
            return Err(Error::Packaging {
                stderr: output.stderr,
            });
        }

        Ok(())
    }

    /// Invokes the signing tool:
    /// `<tool> sign --ks <store> --ks-pass pass:<pw> --out <signed> <unsigned>`.
    async fn run_signing_tool(&self, unsigned_apk: &Path, signed_apk: &Path) -> Result<()> {
        let args = [
            OsString::from("sign"),
            OsString::from("--ks"),
            self.config.key_store.as_os_str().to_os_string(),
            OsString::from("--ks-pass"),
            OsString::from(format!("pass:{}", self.config.key_store_password)),
            OsString::from("--out"),
            signed_apk.as_os_str().to_os_string(),
            unsigned_apk.as_os_str().to_os_string(),
        ];

        let output = self
            .runner
            .run(
                &self.config.signing_tool,
                &args,
                self.config.process_timeout(),
            )
            .await
            .map_err(|e| Error::Signing {
                stderr: e.to_string(),
            })?;

        if !output.success {
            log::warn!(
                "Signing tool exited with code {:?} for {}",
                output.code,
                unsigned_apk.display()
            );
            return Err(Error::Signing {
                stderr: output.stderr,
            });
        }

        Ok(())
    }

    /// Confirms the signing tool delivered a readable, non-empty artifact
    /// and fingerprints it.
    async fn verify_signed_apk(&self, signed_apk: &Path) -> Result<(u64, String)> {
        let metadata = tokio::fs::metadata(signed_apk)
            .await
            .map_err(|_| Error::Signing {
                stderr: format!(
                    "signing tool exited successfully but produced no artifact at {}",
                    signed_apk.display()
                ),
            })?;

        if metadata.len() == 0 {
            return Err(Error::Signing {
                stderr: format!(
                    "signing tool exited successfully but the artifact at {} is empty",
                    signed_apk.display()
                ),
            });
        }

        let checksum = checksum::sha256_file(signed_apk).await?;
        Ok((metadata.len(), checksum))
    }
}

/// The URL is embedded as-is; log when it looks broken so operators can see
/// likely-dead builds without changing accepted inputs.
fn warn_on_unparseable_url(website_url: &str) {
    if url::Url::parse(website_url).is_err() {
        log::warn!("websiteURL {website_url:?} does not parse as a URL; embedding verbatim");
    }
}
