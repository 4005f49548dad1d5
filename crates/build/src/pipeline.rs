//! Delegation to the program that actually builds.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::BuildError;
use crate::options::BuildOptions;

/// Performs a build for a set of options and reports what it did.
#[async_trait]
pub trait BuildPipeline: Send + Sync {
    async fn build(&self, options: &BuildOptions) -> Result<String, BuildError>;
}

/// Runs an external program, handing it the options as JSON on stdin.
///
/// The program's stdout (trimmed) is the build result; a non-zero exit is a
/// failure carrying its stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPipeline {
    program: String,
    args: Vec<String>,
}

impl ScriptPipeline {
    pub fn new<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated command line into program and arguments.
    ///
    /// Quotes are not interpreted. Use [`ScriptPipeline::new`] for a program
    /// or argument that contains spaces.
    pub fn from_command_line(line: &str) -> Result<Self, BuildError> {
        let mut parts = line.split_whitespace();
        let program = parts.next().ok_or(BuildError::NoPipeline)?;
        Ok(Self::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl BuildPipeline for ScriptPipeline {
    async fn build(&self, options: &BuildOptions) -> Result<String, BuildError> {
        let payload = serde_json::to_vec(options)?;

        tracing::debug!(program = %self.program, args = ?self.args, "starting build pipeline");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                // The program exited without reading its options; its exit
                // status and stderr below say why.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!(program = %self.program, "build pipeline closed stdin early");
                }
                Err(e) => return Err(e.into()),
            }
            // Dropping closes the pipe so the program sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!(code = ?output.status.code(), "build pipeline failed");
            return Err(BuildError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
