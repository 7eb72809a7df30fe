//! Command execution
//!
//! An operation is a list of command templates. They are materialized into
//! literal shell strings first, then run strictly in order by a single loop
//! that stops at the first failure. Steps that already ran are not undone.

use applaunch_core::prelude::*;
use applaunch_daemon::{CommandContext, CommandTemplate, LocalCommandRunner};

use crate::frontend::LocalFrontend;

/// How an action ended, as seen by the caller of the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The commands ran (or the identifier operation completed)
    Succeeded,
    /// A command or prerequisite failed
    Failed,
    /// Nothing ran: missing identifier or dismissed prompt
    Skipped,
}

/// Result of [`run_sequence`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOutcome {
    Succeeded {
        executed: usize,
    },
    Failed {
        /// Position of the failing command in the sequence
        index: usize,
        command: String,
        /// Raw error text reported by the tool
        cause: String,
    },
}

impl SequenceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SequenceOutcome::Succeeded { .. })
    }
}

/// Result of [`run_tolerant`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TolerantOutcome {
    pub attempted: usize,
    pub failed: usize,
}

impl TolerantOutcome {
    /// Failure iff every command failed, including when there were none
    pub fn is_failure(&self) -> bool {
        self.failed == self.attempted
    }
}

/// Render templates into literal commands
pub fn materialize<T: CommandTemplate>(templates: &[T], ctx: &CommandContext<'_>) -> Vec<String> {
    templates.iter().map(|t| t.render(ctx)).collect()
}

/// Run commands in order, stopping at the first failure
pub async fn run_sequence<R: LocalCommandRunner>(
    runner: &R,
    commands: &[String],
) -> SequenceOutcome {
    for (index, command) in commands.iter().enumerate() {
        if let Err(e) = runner.run(command).await {
            warn!("Command {} of {} failed: {}", index + 1, commands.len(), e);
            return SequenceOutcome::Failed {
                index,
                command: command.clone(),
                cause: e.to_string(),
            };
        }
    }

    SequenceOutcome::Succeeded {
        executed: commands.len(),
    }
}

/// Run a sequence and notify `success` or `"{failure} : {cause}"`
pub async fn execute<R, F>(
    runner: &R,
    frontend: &F,
    commands: &[String],
    success: &str,
    failure: &str,
) -> ActionOutcome
where
    R: LocalCommandRunner,
    F: LocalFrontend,
{
    match run_sequence(runner, commands).await {
        SequenceOutcome::Succeeded { executed } => {
            info!("{} ({} commands)", success, executed);
            frontend.info(success).await;
            ActionOutcome::Succeeded
        }
        SequenceOutcome::Failed { cause, .. } => {
            frontend.error(&format!("{} : {}", failure, cause)).await;
            ActionOutcome::Failed
        }
    }
}

/// Run every command regardless of earlier failures
pub async fn run_tolerant<R: LocalCommandRunner>(runner: &R, commands: &[String]) -> TolerantOutcome {
    let mut outcome = TolerantOutcome {
        attempted: commands.len(),
        failed: 0,
    };

    for command in commands {
        if let Err(e) = runner.run(command).await {
            debug!("Ignoring failure of {:?}: {}", command, e);
            outcome.failed += 1;
        }
    }

    outcome
}
