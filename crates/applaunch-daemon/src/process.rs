//! Shell command execution
//!
//! Every `adb` / `idb` invocation is a literal shell string (iOS commands chain
//! `idb connect` and the actual command with `&&`), so commands are handed to
//! the platform shell rather than split into argv.

use std::process::Stdio;
use tokio::process::Command;

use applaunch_core::prelude::*;

/// Captured output of a command that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs shell command strings
///
/// A command that cannot be spawned yields [`Error::CommandSpawn`]; one that
/// exits non-zero yields [`Error::CommandFailed`] carrying the tool's raw
/// error text.
#[trait_variant::make(CommandRunner: Send)]
pub trait LocalCommandRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands through `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl LocalCommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput> {
        debug!("Running: {}", command);

        let output = shell_command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::command_spawn(command, e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            warn!(
                "`{}` failed with exit code {:?}: {}",
                command,
                output.status.code(),
                stderr.trim()
            );
            // adb reports some failures (e.g. "Failure [DELETE_FAILED...]") on stdout
            let text = if stderr.trim().is_empty() {
                &stdout
            } else {
                &stderr
            };
            return Err(Error::command_failed(command, output.status.code(), text));
        }

        trace!("`{}` stdout: {}", command, stdout);
        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
