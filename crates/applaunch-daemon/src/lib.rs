//! # applaunch-daemon - adb / idb Process Management
//!
//! Everything that talks to the external platform tools: running shell
//! commands, rendering command templates, and parsing tool output.
//!
//! Depends on [`applaunch_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Process Management
//! - [`LocalCommandRunner`] / [`CommandRunner`] - Run a literal shell command
//! - [`ShellRunner`] - Runner backed by `sh -c` / `cmd /C`
//!
//! ### Command Templates
//! - [`AdbCommand`], [`IdbCommand`] - Command shapes for each tool
//! - [`CommandContext`] - Tool, identifier and device substituted into templates
//!
//! ### Device Discovery
//! - [`discover_devices()`] - List devices via `adb devices` / `idb list-targets`
//! - [`ios_label()`], [`resolve_by_name()`] - iOS picker labels and their resolution
//!
//! ### Permissions
//! - [`parse_granted_permissions()`] - Granted permissions from `dumpsys package`
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Locate adb / idb
//! - [`probe_tool()`] - Prerequisite probe command

pub mod commands;
pub mod devices;
pub mod permissions;
pub mod process;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

// Public API re-exports
pub use commands::{shell_quote, AdbCommand, CommandContext, CommandTemplate, IdbCommand};
pub use devices::{
    discover_devices, find_device, ios_label, name_from_label, parse_adb_devices,
    parse_idb_targets, resolve_by_name, sort_ios_devices,
};
pub use permissions::parse_granted_permissions;
pub use process::{CommandOutput, CommandRunner, LocalCommandRunner, ShellRunner};
pub use tool_availability::{probe_command, probe_tool, ToolAvailability};
