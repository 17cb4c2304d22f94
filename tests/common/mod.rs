//! Shared utilities for integration tests.
#![allow(dead_code)] // Not every test crate uses every helper

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use webtoapk::config::BuildConfig;
use webtoapk::pipeline::{ToolError, ToolOutput, ToolRunner};

/// What a scripted tool should do when invoked.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Exit zero and create the output file named in the arguments.
    Succeed,
    /// Exit non-zero with the given stderr text.
    Fail(&'static str),
}

/// [`ToolRunner`] fake that records invocations and plays back configured
/// behaviors instead of spawning processes.
pub struct ScriptedRunner {
    packaging: Behavior,
    signing: Behavior,
    invocations: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(packaging: Behavior, signing: Behavior) -> Self {
        Self {
            packaging,
            signing,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Program names invoked so far, in order.
    pub fn invoked(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        _timeout: Option<Duration>,
    ) -> Result<ToolOutput, ToolError> {
        let name = program
            .file_name()
            .expect("tool path has a file name")
            .to_string_lossy()
            .into_owned();
        self.invocations.lock().unwrap().push(name.clone());

        let (behavior, output_flag) = if name.contains("apktool") {
            (self.packaging, "-o")
        } else {
            (self.signing, "--out")
        };

        match behavior {
            Behavior::Succeed => {
                // Honor the tool contract: the named output file exists on exit 0
                let flag_pos = args
                    .iter()
                    .position(|a| a.as_os_str() == OsStr::new(output_flag))
                    .expect("output flag present");
                let out = PathBuf::from(&args[flag_pos + 1]);
                std::fs::write(&out, b"artifact bytes").unwrap();
                Ok(ToolOutput {
                    success: true,
                    code: Some(0),
                    stderr: String::new(),
                })
            }
            Behavior::Fail(stderr) => Ok(ToolOutput {
                success: false,
                code: Some(1),
                stderr: stderr.to_string(),
            }),
        }
    }
}

/// Build config rooted in a per-test temp directory.
pub fn test_config(output_root: &Path) -> BuildConfig {
    BuildConfig {
        output_root: output_root.to_path_buf(),
        ..Default::default()
    }
}
