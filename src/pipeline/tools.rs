//! External tool invocation.
//!
//! The packaging and signing tools are reached through the [`ToolRunner`]
//! trait so tests can swap in scripted fakes. The real implementation runs
//! one child process at a time, awaited to completion, with stderr captured
//! as the sole diagnostic surface.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of one awaited child process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the process exited with status zero.
    pub success: bool,

    /// Exit code, when the process exited normally.
    pub code: Option<i32>,

    /// Captured standard-error text (lossy UTF-8), verbatim.
    pub stderr: String,
}

/// Failure to obtain an exit status at all.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The process could not be started.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// The process outlived the configured bound and was killed.
    #[error("{program} timed out after {timeout:?} and was killed")]
    Timeout {
        /// Program that hung
        program: String,
        /// Bound that was exceeded
        timeout: Duration,
    },
}

/// Process-execution seam between the pipeline and the external tools.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Runs `program` with `args`, blocking the calling task until it exits
    /// or `timeout` elapses.
    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Option<Duration>,
    ) -> Result<ToolOutput, ToolError>;
}

/// [`ToolRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandRunner;

#[async_trait]
impl ToolRunner for CommandRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Option<Duration>,
    ) -> Result<ToolOutput, ToolError> {
        let program_name = program.display().to_string();
        log::debug!("Running {} {:?}", program_name, args);

        let mut command = tokio::process::Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out future must not leave the child running
            .kill_on_drop(true);

        let spawn_err = |source| ToolError::Spawn {
            program: program_name.clone(),
            source,
        };

        let output = match timeout {
            Some(bound) => tokio::time::timeout(bound, command.output())
                .await
                .map_err(|_| ToolError::Timeout {
                    program: program_name.clone(),
                    timeout: bound,
                })?
                .map_err(spawn_err)?,
            None => command.output().await.map_err(spawn_err)?,
        };

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
