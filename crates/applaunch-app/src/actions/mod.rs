//! Per-platform actions
//!
//! Platform behaviour sits behind [`PlatformActions`]: which tool to run, how
//! devices are labelled in the picker and resolved back, and the command plan
//! for each [`Operation`]. The orchestrator only ever talks to this trait.

use std::fmt;

use applaunch_core::prelude::*;
use applaunch_core::{Device, Platform};
use applaunch_daemon::CommandTemplate;

pub mod android;
pub mod ios;

pub use android::AndroidActions;
pub use ios::IosActions;

/// A boxed command template
pub type Template = Box<dyn CommandTemplate + Send + Sync>;

/// Actions for `platform`, rendering commands with `tool`
pub fn for_platform(platform: Platform, tool: &str) -> Box<dyn PlatformActions + Send + Sync> {
    match platform {
        Platform::Android => Box::new(AndroidActions::new(tool)),
        Platform::Ios => Box::new(IosActions::new(tool)),
    }
}

/// User-facing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetId,
    SetId,
    Uninstall,
    Kill,
    Start,
    Restart,
    ClearData,
    ClearDataAndRestart,
    RevokePermissions,
    RestartServer,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::GetId,
        Operation::SetId,
        Operation::Uninstall,
        Operation::Kill,
        Operation::Start,
        Operation::Restart,
        Operation::ClearData,
        Operation::ClearDataAndRestart,
        Operation::RevokePermissions,
        Operation::RestartServer,
    ];

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetId => "get-id",
            Operation::SetId => "set-id",
            Operation::Uninstall => "uninstall",
            Operation::Kill => "kill",
            Operation::Start => "start",
            Operation::Restart => "restart",
            Operation::ClearData => "clear-data",
            Operation::ClearDataAndRestart => "clear-data-restart",
            Operation::RevokePermissions => "revoke-permissions",
            Operation::RestartServer => "restart-server",
        }
    }

    /// Whether the stored identifier must be resolved before dispatch
    pub fn ensures_identifier(&self) -> bool {
        !matches!(self, Operation::SetId | Operation::RestartServer)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a plan's commands are run
pub enum Execution {
    /// Run in order, stop at the first failure
    Sequence(Vec<Template>),

    /// Run `query`, then `revoke` each granted permission it reports,
    /// ignoring individual failures
    RevokeGranted {
        query: Template,
        revoke: fn(&str) -> Template,
    },
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Sequence(templates) => {
                write!(f, "Sequence({} commands)", templates.len())
            }
            Execution::RevokeGranted { .. } => f.write_str("RevokeGranted"),
        }
    }
}

/// Everything the orchestrator needs to run one command operation
#[derive(Debug)]
pub struct OperationPlan {
    pub execution: Execution,
    pub needs_device: bool,
    pub needs_identifier: bool,
    pub success: String,
    pub failure: String,
}

impl OperationPlan {
    /// Plan for commands run against `app_id` on a chosen device
    pub fn on_device(
        templates: Vec<Template>,
        success: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        Self {
            execution: Execution::Sequence(templates),
            needs_device: true,
            needs_identifier: true,
            success: success.into(),
            failure: failure.into(),
        }
    }
}

/// Capabilities of one platform
pub trait PlatformActions {
    fn platform(&self) -> Platform;

    /// Tool binary commands are rendered with
    fn tool(&self) -> &str;

    fn supports(&self, operation: Operation) -> bool;

    /// Select the only listed device without prompting
    fn auto_select_single(&self) -> bool;

    /// Picker label for a device
    fn device_label(&self, device: &Device) -> String;

    /// Map a picked label back to its device
    fn resolve_label<'a>(&self, devices: &'a [Device], label: &str) -> Option<&'a Device>;

    /// Command plan for a command operation
    ///
    /// `GetId` and `SetId` run no commands and have no plan.
    fn plan(&self, operation: Operation, app_id: &str) -> Result<OperationPlan>;

    fn unsupported(&self, operation: Operation) -> Error {
        Error::unsupported(operation.name(), self.platform())
    }
}
