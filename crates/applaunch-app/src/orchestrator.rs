//! Per-invocation control flow
//!
//! One [`Launcher::run`] call handles one operation:
//!
//! 1. Probe the platform tool (when `behavior.check_tools` is on). A failed
//!    probe is reported with a setup docs link and the run continues.
//! 2. Make sure an identifier is stored, detecting it from the project's
//!    build files or asking for it.
//! 3. Dispatch: show / set the identifier, or select a device and run the
//!    operation's commands.
//!
//! The identifier is checked before any device is listed.

use std::path::PathBuf;

use applaunch_core::prelude::*;
use applaunch_core::{detect, is_valid, Platform};
use applaunch_daemon::{
    parse_granted_permissions, probe_tool, CommandContext, CommandTemplate, LocalCommandRunner,
};

use crate::actions::{Execution, Operation, PlatformActions, Template};
use crate::config::Settings;
use crate::executor::{execute, materialize, run_tolerant, ActionOutcome};
use crate::frontend::LocalFrontend;
use crate::selector::select_device;
use crate::store::IdentifierStore;

pub const MISSING_IDENTIFIER: &str = "No application id currently set";
pub const INVALID_IDENTIFIER: &str = "Invalid application id";
pub const INPUT_PLACEHOLDER: &str = "Type your application id (package name)";

/// Runs operations for one platform
pub struct Launcher<R, F, S> {
    runner: R,
    frontend: F,
    store: S,
    actions: Box<dyn PlatformActions + Send + Sync>,
    settings: Settings,
    roots: Vec<PathBuf>,
    device: Option<String>,
}

impl<R, F, S> Launcher<R, F, S>
where
    R: LocalCommandRunner,
    F: LocalFrontend,
    S: IdentifierStore,
{
    pub fn new(
        runner: R,
        frontend: F,
        store: S,
        actions: Box<dyn PlatformActions + Send + Sync>,
        settings: Settings,
    ) -> Self {
        Self {
            runner,
            frontend,
            store,
            actions,
            settings,
            roots: Vec::new(),
            device: None,
        }
    }

    /// Project roots scanned for build files, in priority order
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Device specifier that bypasses the picker
    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn platform(&self) -> Platform {
        self.actions.platform()
    }

    /// Run one operation
    ///
    /// Failures the user is told about resolve to [`ActionOutcome::Failed`];
    /// only fatal errors (unsupported operation, store I/O) are returned.
    pub async fn run(&self, operation: Operation) -> Result<ActionOutcome> {
        if !self.actions.supports(operation) {
            return Err(self.actions.unsupported(operation));
        }

        info!("Running {} {}", self.platform(), operation);

        if self.settings.behavior.check_tools {
            self.check_prerequisite().await;
        }

        if operation.ensures_identifier() {
            self.ensure_identifier().await?;
        }

        let outcome = match operation {
            Operation::GetId => self.show_identifier().await,
            Operation::SetId => self.set_identifier().await?,
            _ => self.run_plan(operation).await?,
        };

        debug!("{} {} finished: {:?}", self.platform(), operation, outcome);
        Ok(outcome)
    }

    /// Probe the tool; returns whether it ran
    pub async fn check_prerequisite(&self) -> bool {
        let platform = self.platform();
        match probe_tool(&self.runner, platform, self.actions.tool()).await {
            Ok(()) => true,
            Err(e) => {
                warn!("{} probe failed: {}", platform.tool_name(), e);
                let message = format!("{} is not available : {}", platform.tool_name(), e);
                self.frontend
                    .error_with_link(&message, &self.settings.setup_docs(platform))
                    .await;
                false
            }
        }
    }

    /// Fill an empty store by detection, then by asking
    pub async fn ensure_identifier(&self) -> Result<()> {
        let platform = self.platform();
        if !self.store.get(platform).is_empty() {
            return Ok(());
        }

        if self.settings.behavior.auto_detect {
            let detected = detect(platform, &self.roots);
            if !detected.is_empty() {
                self.store.set(platform, &detected)?;
                self.frontend
                    .info(&format!("{} application id detected", detected))
                    .await;
                return Ok(());
            }
        }

        self.set_identifier().await.map(|_| ())
    }

    async fn show_identifier(&self) -> ActionOutcome {
        let id = self.store.get(self.platform());
        if id.is_empty() {
            self.frontend.info(MISSING_IDENTIFIER).await;
            return ActionOutcome::Skipped;
        }

        self.frontend.info(&id).await;
        ActionOutcome::Succeeded
    }

    /// Ask for an identifier and store it
    ///
    /// Dismissing the prompt keeps the stored value; submitting an empty
    /// string clears it.
    async fn set_identifier(&self) -> Result<ActionOutcome> {
        let platform = self.platform();

        let input = match self.frontend.input(INPUT_PLACEHOLDER).await {
            Ok(Some(input)) => input,
            Ok(None) => return Ok(ActionOutcome::Skipped),
            Err(e) => {
                error!("Input prompt failed: {}", e);
                self.frontend.error(&e.to_string()).await;
                return Ok(ActionOutcome::Failed);
            }
        };
        let id = input.trim();

        if !id.is_empty() && !is_valid(id) {
            debug!("Rejected {:?}: {}", id, Error::invalid_identifier(id));
            self.frontend.error(INVALID_IDENTIFIER).await;
            return Ok(ActionOutcome::Failed);
        }

        self.store.set(platform, id)?;

        if id.is_empty() {
            info!("Cleared {} application id", platform);
        } else {
            self.frontend
                .info(&format!("{} application id selected", id))
                .await;
        }
        Ok(ActionOutcome::Succeeded)
    }

    async fn run_plan(&self, operation: Operation) -> Result<ActionOutcome> {
        let id = self.store.get(self.platform());
        let plan = self.actions.plan(operation, &id)?;

        if plan.needs_identifier && id.is_empty() {
            self.frontend.info(MISSING_IDENTIFIER).await;
            return Ok(ActionOutcome::Skipped);
        }

        let device = if plan.needs_device {
            let selected = select_device(
                &self.runner,
                &self.frontend,
                &*self.actions,
                self.device.as_deref(),
            )
            .await;

            match selected {
                Ok(Some(device)) => device.id,
                Ok(None) => {
                    self.frontend.error(&Error::NoDevice.to_string()).await;
                    return Ok(ActionOutcome::Failed);
                }
                Err(e) if e.is_recoverable() => {
                    self.frontend.error(&e.to_string()).await;
                    return Ok(ActionOutcome::Failed);
                }
                Err(e) => return Err(e),
            }
        } else {
            String::new()
        };

        let ctx = CommandContext::new(self.actions.tool(), &id, &device);

        let outcome = match plan.execution {
            Execution::Sequence(templates) => {
                let commands = materialize(&templates, &ctx);
                execute(
                    &self.runner,
                    &self.frontend,
                    &commands,
                    &plan.success,
                    &plan.failure,
                )
                .await
            }
            Execution::RevokeGranted { query, revoke } => {
                self.revoke_granted(&ctx, &query, revoke, &plan.success, &plan.failure)
                    .await
            }
        };

        Ok(outcome)
    }

    async fn revoke_granted(
        &self,
        ctx: &CommandContext<'_>,
        query: &Template,
        revoke: fn(&str) -> Template,
        success: &str,
        failure: &str,
    ) -> ActionOutcome {
        let output = match self.runner.run(&query.render(ctx)).await {
            Ok(output) => output,
            Err(e) => {
                self.frontend.error(&format!("{} : {}", failure, e)).await;
                return ActionOutcome::Failed;
            }
        };

        let permissions = parse_granted_permissions(&output.stdout);
        let commands: Vec<String> = permissions.iter().map(|p| revoke(p).render(ctx)).collect();
        let outcome = run_tolerant(&self.runner, &commands).await;

        info!(
            "Revoked {} of {} granted permissions",
            outcome.attempted - outcome.failed,
            outcome.attempted
        );

        if outcome.is_failure() {
            self.frontend.error(failure).await;
            ActionOutcome::Failed
        } else {
            self.frontend.info(success).await;
            ActionOutcome::Succeeded
        }
    }
}
