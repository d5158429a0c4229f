//! Execution of a single command against the system under test.

use std::io;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Why a single command did not succeed.
///
/// The executor only logs these: a failed command still counts as a completed operation.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The command could not be started.
    #[error("failed to spawn command: {0}")]
    Spawn(#[from] io::Error),

    /// The command ran but exited unsuccessfully.
    #[error("command exited with {0}")]
    Exit(ExitStatus),
}

/// Runs one command to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    /// Runs `command` and waits for it to finish.
    async fn run(&self, command: &str) -> Result<(), TaskError>;
}

/// Runs commands through a shell, as `<shell> -c <command>`.
///
/// Output of the commands is discarded.
#[derive(Clone, Debug)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Creates a runner using the given shell executable.
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<(), TaskError> {
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(TaskError::Exit(status))
        }
    }
}
