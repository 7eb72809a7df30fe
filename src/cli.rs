//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use applaunch_app::Operation;
use applaunch_core::Platform;

/// App Launcher - run adb/idb lifecycle commands against the app under development
#[derive(Parser, Debug)]
#[command(name = "applaunch", version)]
#[command(about = "Run adb/idb lifecycle commands against the app under development", long_about = None)]
pub struct Args {
    /// Project root scanned for build files (repeatable, first one holds config and state)
    #[arg(long = "project", value_name = "PATH", global = true)]
    pub projects: Vec<PathBuf>,

    /// Target device (serial, UDID or name), skips the picker
    #[arg(long, value_name = "SPEC", global = true)]
    pub device: Option<String>,

    /// Print notifications as JSON lines and never prompt
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Android actions through adb
    Android {
        #[command(subcommand)]
        action: AndroidAction,
    },

    /// iOS actions through idb
    Ios {
        #[command(subcommand)]
        action: IosAction,
    },

    /// Create .applaunch/config.toml in the first project root
    Init,
}

impl Command {
    /// Platform and operation to run, `None` for `init`
    pub fn target(&self) -> Option<(Platform, Operation)> {
        match *self {
            Command::Android { action } => Some((Platform::Android, action.into())),
            Command::Ios { action } => Some((Platform::Ios, action.into())),
            Command::Init => None,
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidAction {
    /// Show the stored application id
    GetId,
    /// Replace the stored application id
    SetId,
    Uninstall,
    /// Force-stop the app
    Kill,
    /// Launch the app
    Start,
    /// Force-stop, then launch
    Restart,
    /// Clear the app's data
    ClearData,
    /// Clear data, force-stop, then launch
    #[command(name = "clear-data-restart")]
    ClearDataAndRestart,
    /// Revoke every granted runtime permission
    RevokePermissions,
    /// Restart the adb server
    RestartServer,
}

impl From<AndroidAction> for Operation {
    fn from(action: AndroidAction) -> Self {
        match action {
            AndroidAction::GetId => Operation::GetId,
            AndroidAction::SetId => Operation::SetId,
            AndroidAction::Uninstall => Operation::Uninstall,
            AndroidAction::Kill => Operation::Kill,
            AndroidAction::Start => Operation::Start,
            AndroidAction::Restart => Operation::Restart,
            AndroidAction::ClearData => Operation::ClearData,
            AndroidAction::ClearDataAndRestart => Operation::ClearDataAndRestart,
            AndroidAction::RevokePermissions => Operation::RevokePermissions,
            AndroidAction::RestartServer => Operation::RestartServer,
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IosAction {
    /// Show the stored bundle id
    GetId,
    /// Replace the stored bundle id
    SetId,
    Uninstall,
    /// Terminate the app
    Kill,
    /// Launch the app
    Start,
    /// Terminate, then launch
    Restart,
}

impl From<IosAction> for Operation {
    fn from(action: IosAction) -> Self {
        match action {
            IosAction::GetId => Operation::GetId,
            IosAction::SetId => Operation::SetId,
            IosAction::Uninstall => Operation::Uninstall,
            IosAction::Kill => Operation::Kill,
            IosAction::Start => Operation::Start,
            IosAction::Restart => Operation::Restart,
        }
    }
}
