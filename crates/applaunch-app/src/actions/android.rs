//! Android actions over `adb`

use applaunch_core::prelude::*;
use applaunch_core::{Device, Platform};
use applaunch_daemon::{find_device, AdbCommand};

use super::{Execution, Operation, OperationPlan, PlatformActions, Template};

#[derive(Debug, Clone)]
pub struct AndroidActions {
    adb: String,
}

impl AndroidActions {
    pub fn new(adb: impl Into<String>) -> Self {
        Self { adb: adb.into() }
    }
}

fn adb(command: AdbCommand) -> Template {
    Box::new(command)
}

fn revoke(permission: &str) -> Template {
    adb(AdbCommand::Revoke {
        permission: permission.to_string(),
    })
}

impl PlatformActions for AndroidActions {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn tool(&self) -> &str {
        &self.adb
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    fn auto_select_single(&self) -> bool {
        true
    }

    fn device_label(&self, device: &Device) -> String {
        device.id.clone()
    }

    fn resolve_label<'a>(&self, devices: &'a [Device], label: &str) -> Option<&'a Device> {
        devices.iter().find(|d| d.id == label).or_else(|| find_device(devices, label))
    }

    fn plan(&self, operation: Operation, id: &str) -> Result<OperationPlan> {
        let plan = match operation {
            Operation::GetId | Operation::SetId => return Err(self.unsupported(operation)),
            Operation::Uninstall => OperationPlan::on_device(
                vec![adb(AdbCommand::Uninstall)],
                format!("Uninstalled {} successfully", id),
                format!("Failed to uninstall {}", id),
            ),
            Operation::Kill => OperationPlan::on_device(
                vec![adb(AdbCommand::ForceStop)],
                format!("Killed {} successfully", id),
                format!("Failed to kill {}", id),
            ),
            Operation::Start => OperationPlan::on_device(
                vec![adb(AdbCommand::Launch)],
                format!("Started {} successfully", id),
                format!("Failed to start {}", id),
            ),
            Operation::Restart => OperationPlan::on_device(
                vec![adb(AdbCommand::ForceStop), adb(AdbCommand::Launch)],
                format!("Restarted {} successfully", id),
                format!("Failed to restart {}", id),
            ),
            Operation::ClearData => OperationPlan::on_device(
                vec![adb(AdbCommand::ClearData)],
                format!("Cleared {} data successfully", id),
                format!("Failed to clear {} data", id),
            ),
            Operation::ClearDataAndRestart => OperationPlan::on_device(
                vec![
                    adb(AdbCommand::ClearData),
                    adb(AdbCommand::ForceStop),
                    adb(AdbCommand::Launch),
                ],
                format!("Cleared {} data and restarted successfully", id),
                format!("Failed to clear {} data and restart", id),
            ),
            Operation::RevokePermissions => OperationPlan {
                execution: Execution::RevokeGranted {
                    query: adb(AdbCommand::DumpPackage),
                    revoke,
                },
                needs_device: true,
                needs_identifier: true,
                success: format!("Revoked {} permissions successfully", id),
                failure: format!(
                    "Failed to revoke {} permissions, probably no runtime permission was granted",
                    id
                ),
            },
            Operation::RestartServer => OperationPlan {
                execution: Execution::Sequence(vec![
                    adb(AdbCommand::KillServer),
                    adb(AdbCommand::StartServer),
                ]),
                needs_device: false,
                needs_identifier: false,
                success: "Restarted ADB server successfully".to_string(),
                failure: "Failed to restart ADB server".to_string(),
            },
        };

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::materialize;
    use applaunch_daemon::{CommandContext, CommandTemplate};

    fn rendered(operation: Operation) -> Vec<String> {
        let actions = AndroidActions::new("adb");
        let plan = actions.plan(operation, "com.acme.demo").unwrap();
        let ctx = CommandContext::new("adb", "com.acme.demo", "emulator-5554");
        match plan.execution {
            Execution::Sequence(templates) => materialize(&templates, &ctx),
            Execution::RevokeGranted { query, .. } => vec![query.render(&ctx)],
        }
    }

    #[test]
    fn test_restart_is_kill_then_start() {
        assert_eq!(
            rendered(Operation::Restart),
            vec![
                "adb -s emulator-5554 shell am force-stop com.acme.demo",
                "adb -s emulator-5554 shell monkey -p com.acme.demo -c android.intent.category.LAUNCHER 1",
            ]
        );
    }

    #[test]
    fn test_clear_data_and_restart_order() {
        assert_eq!(
            rendered(Operation::ClearDataAndRestart),
            vec![
                "adb -s emulator-5554 shell pm clear com.acme.demo",
                "adb -s emulator-5554 shell am force-stop com.acme.demo",
                "adb -s emulator-5554 shell monkey -p com.acme.demo -c android.intent.category.LAUNCHER 1",
            ]
        );
    }

    #[test]
    fn test_restart_server_needs_nothing() {
        let actions = AndroidActions::new("adb");
        let plan = actions.plan(Operation::RestartServer, "").unwrap();

        assert!(!plan.needs_device);
        assert!(!plan.needs_identifier);
        assert_eq!(
            rendered(Operation::RestartServer),
            vec!["adb kill-server", "adb start-server"]
        );
    }

    #[test]
    fn test_revoke_plan() {
        let actions = AndroidActions::new("adb");
        let plan = actions
            .plan(Operation::RevokePermissions, "com.acme.demo")
            .unwrap();
        let ctx = CommandContext::new("adb", "com.acme.demo", "emulator-5554");

        match plan.execution {
            Execution::RevokeGranted { query, revoke } => {
                assert_eq!(
                    query.render(&ctx),
                    "adb -s emulator-5554 shell dumpsys package com.acme.demo"
                );
                assert_eq!(
                    revoke("android.permission.CAMERA").render(&ctx),
                    "adb -s emulator-5554 shell pm revoke com.acme.demo android.permission.CAMERA"
                );
            }
            other => panic!("unexpected execution {:?}", other),
        }
    }

    #[test]
    fn test_messages() {
        let actions = AndroidActions::new("adb");
        let plan = actions.plan(Operation::ClearData, "com.acme.demo").unwrap();
        assert_eq!(plan.success, "Cleared com.acme.demo data successfully");
        assert_eq!(plan.failure, "Failed to clear com.acme.demo data");
    }

    #[test]
    fn test_identifier_operations_have_no_plan() {
        let actions = AndroidActions::new("adb");
        assert!(actions.plan(Operation::GetId, "").is_err());
    }

    #[test]
    fn test_labels_are_serials() {
        let actions = AndroidActions::new("adb");
        let devices = vec![
            Device::from_serial("emulator-5554"),
            Device::from_serial("R58M12ABCDE"),
        ];

        assert_eq!(actions.device_label(&devices[1]), "R58M12ABCDE");
        assert_eq!(
            actions.resolve_label(&devices, "R58M12ABCDE").map(|d| d.id.as_str()),
            Some("R58M12ABCDE")
        );
        assert!(actions.auto_select_single());
    }
}
