//! Thin wrappers around the `docker` command-line interface.
//!
//! The container runtime is an external, pre-existing system — we invoke its
//! CLI, we do not model its API. Two interaction modes exist:
//! - capture: run to completion, buffer the output, hand it back as a string
//! - stream: inherit the terminal's stdio so the child runs interactively
//!
//! No timeouts are enforced: a hung remote tool hangs the invocation.

use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to invoke `{command}` — is docker installed and on PATH?")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}:\n{output}")]
    Failed {
        command: String,
        code: i32,
        output: String,
    },
}

/// Handle on the docker binary. Constructed once per invocation and passed
/// by reference to whatever needs it.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    pub fn new() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }

    /// Override the binary name. Used by tests to point at a stub.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The full command line, for error messages and debug logs.
    fn render(&self, args: &[String]) -> String {
        let mut cmd = self.binary.clone();
        for arg in args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        cmd
    }

    /// Verify that the docker daemon is reachable.
    pub fn ensure_available(&self) -> Result<(), ExecError> {
        let args: Vec<String> = ["version", "--format", "{{.Server.Version}}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.capture(&args).map(|_| ())
    }

    /// Run a docker command to completion and return its stdout.
    ///
    /// A non-zero exit is an [`ExecError::Failed`] carrying the combined
    /// stdout and stderr so the caller can surface what went wrong.
    pub fn capture(&self, args: &[String]) -> Result<String, ExecError> {
        let output = self.run_piped(args)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(self.failed(args, output.status.code(), &output));
        }
        Ok(stdout)
    }

    /// Run a docker command to completion and return its combined output
    /// (stdout followed by stderr). Used for remote tools whose diagnostics
    /// may land on either stream.
    pub fn capture_combined(&self, args: &[String]) -> Result<String, ExecError> {
        let output = self.run_piped(args)?;
        if !output.status.success() {
            return Err(self.failed(args, output.status.code(), &output));
        }
        Ok(combined(&output))
    }

    /// Run a docker command with inherited stdio so the child's output
    /// appears live and it can receive interactive input. Returns the
    /// child's exit code.
    pub fn stream(&self, args: &[String]) -> Result<i32, ExecError> {
        tracing::debug!(command = %self.render(args), "streaming docker command");
        let status = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                command: self.render(args),
                source,
            })?;
        Ok(status.code().unwrap_or(-1))
    }

    fn run_piped(&self, args: &[String]) -> Result<std::process::Output, ExecError> {
        tracing::debug!(command = %self.render(args), "capturing docker command");
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: self.render(args),
                source,
            })
    }

    fn failed(
        &self,
        args: &[String],
        code: Option<i32>,
        output: &std::process::Output,
    ) -> ExecError {
        ExecError::Failed {
            command: self.render(args),
            code: code.unwrap_or(-1),
            output: combined(output),
        }
    }
}

fn combined(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

/// Convenience for building `Vec<String>` argument lists.
pub fn args<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}
