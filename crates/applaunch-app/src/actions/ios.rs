//! iOS actions over `idb`
//!
//! Only identifier management and uninstall / kill / start / restart exist
//! for iOS; data clearing, permission revocation and server restarts have no
//! `idb` equivalent here.

use applaunch_core::prelude::*;
use applaunch_core::{Device, Platform};
use applaunch_daemon::{ios_label, resolve_by_name, IdbCommand};

use super::{Operation, OperationPlan, PlatformActions, Template};

#[derive(Debug, Clone)]
pub struct IosActions {
    idb: String,
}

impl IosActions {
    pub fn new(idb: impl Into<String>) -> Self {
        Self { idb: idb.into() }
    }
}

fn idb(command: IdbCommand) -> Template {
    Box::new(command)
}

impl PlatformActions for IosActions {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn tool(&self) -> &str {
        &self.idb
    }

    fn supports(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::GetId
                | Operation::SetId
                | Operation::Uninstall
                | Operation::Kill
                | Operation::Start
                | Operation::Restart
        )
    }

    // Prompts even for a single target
    fn auto_select_single(&self) -> bool {
        false
    }

    fn device_label(&self, device: &Device) -> String {
        ios_label(device)
    }

    fn resolve_label<'a>(&self, devices: &'a [Device], label: &str) -> Option<&'a Device> {
        resolve_by_name(devices, label)
    }

    fn plan(&self, operation: Operation, id: &str) -> Result<OperationPlan> {
        let plan = match operation {
            Operation::Uninstall => OperationPlan::on_device(
                vec![idb(IdbCommand::Uninstall)],
                format!("Uninstalled {} successfully", id),
                format!("Failed to uninstall {}", id),
            ),
            Operation::Kill => OperationPlan::on_device(
                vec![idb(IdbCommand::Terminate)],
                format!("Killed {} successfully", id),
                format!("Failed to kill {}", id),
            ),
            Operation::Start => OperationPlan::on_device(
                vec![idb(IdbCommand::Launch)],
                format!("Started {} successfully", id),
                format!("Failed to start {}", id),
            ),
            Operation::Restart => OperationPlan::on_device(
                vec![idb(IdbCommand::Terminate), idb(IdbCommand::Launch)],
                format!("Restarted {} successfully", id),
                format!("Failed to restart {}", id),
            ),
            _ => return Err(self.unsupported(operation)),
        };

        Ok(plan)
    }
}
