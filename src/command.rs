//! Running external programs with a bounded wait, or fully detached.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tracing::debug;

/// Failure of an external command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// A program invocation: name, arguments and how long we are willing to wait for it.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    check_status: bool,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(5),
            check_status: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept stdout even when the program exits non-zero.
    pub fn allow_failure(mut self) -> Self {
        self.check_status = false;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run to completion and return captured stdout.
    ///
    /// A child still running at the deadline is killed. A non-zero exit status is an error
    /// unless [`allow_failure`](Self::allow_failure) was set.
    pub async fn output(&self) -> Result<String, CommandError> {
        debug!(program = %self.program, args = ?self.args, "running command");

        let child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CommandError::Timeout {
                program: self.program.clone(),
                after: self.timeout,
            })?
            .map_err(|source| CommandError::Wait {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            if !self.check_status {
                debug!(program = %self.program, status = %output.status, "ignoring exit status");
                return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
            }
            return Err(CommandError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start the program and return immediately.
    ///
    /// The child is never waited on and may outlive this process; only a failure to
    /// start it is reported.
    pub fn spawn_detached(&self) -> Result<(), CommandError> {
        debug!(program = %self.program, args = ?self.args, "spawning detached command");

        let child = std::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        drop(child);
        Ok(())
    }
}
