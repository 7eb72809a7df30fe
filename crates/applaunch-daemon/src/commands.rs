//! Command templates for `adb` and `idb`
//!
//! Templates are plain values; rendering them is side-effect free and kept
//! apart from execution so a whole operation can be materialized up front.

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Tool binary (`adb`, `idb`, or a configured path)
    pub tool: &'a str,
    /// Application id / bundle id
    pub app_id: &'a str,
    /// Device serial / UDID; empty for device-less commands
    pub device: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn new(tool: &'a str, app_id: &'a str, device: &'a str) -> Self {
        Self {
            tool,
            app_id,
            device,
        }
    }
}

/// Something that renders to a literal shell command
pub trait CommandTemplate {
    fn render(&self, ctx: &CommandContext<'_>) -> String;
}

impl<T: CommandTemplate + ?Sized> CommandTemplate for Box<T> {
    fn render(&self, ctx: &CommandContext<'_>) -> String {
        (**self).render(ctx)
    }
}

/// Android Debug Bridge command shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdbCommand {
    Uninstall,
    ClearData,
    ForceStop,
    Launch,
    DumpPackage,
    Revoke { permission: String },
    KillServer,
    StartServer,
    Devices,
    Version,
}

impl CommandTemplate for AdbCommand {
    fn render(&self, ctx: &CommandContext<'_>) -> String {
        let adb = shell_quote(ctx.tool);
        let dev = shell_quote(ctx.device);
        let id = shell_quote(ctx.app_id);

        match self {
            AdbCommand::Uninstall => format!("{} -s {} uninstall {}", adb, dev, id),
            AdbCommand::ClearData => format!("{} -s {} shell pm clear {}", adb, dev, id),
            AdbCommand::ForceStop => format!("{} -s {} shell am force-stop {}", adb, dev, id),
            AdbCommand::Launch => format!(
                "{} -s {} shell monkey -p {} -c android.intent.category.LAUNCHER 1",
                adb, dev, id
            ),
            AdbCommand::DumpPackage => format!("{} -s {} shell dumpsys package {}", adb, dev, id),
            AdbCommand::Revoke { permission } => format!(
                "{} -s {} shell pm revoke {} {}",
                adb,
                dev,
                id,
                shell_quote(permission)
            ),
            AdbCommand::KillServer => format!("{} kill-server", adb),
            AdbCommand::StartServer => format!("{} start-server", adb),
            AdbCommand::Devices => format!("{} devices", adb),
            AdbCommand::Version => format!("{} version", adb),
        }
    }
}

/// iOS Development Bridge command shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdbCommand {
    Uninstall,
    Terminate,
    Launch,
    ListTargets,
    Help,
}

impl CommandTemplate for IdbCommand {
    fn render(&self, ctx: &CommandContext<'_>) -> String {
        let idb = shell_quote(ctx.tool);
        let dev = shell_quote(ctx.device);
        let id = shell_quote(ctx.app_id);

        match self {
            IdbCommand::Uninstall => {
                format!("{} connect {} && {} uninstall {}", idb, dev, idb, id)
            }
            IdbCommand::Terminate => {
                format!("{} connect {} && {} terminate {}", idb, dev, idb, id)
            }
            IdbCommand::Launch => format!("{} connect {} && {} launch {}", idb, dev, idb, id),
            IdbCommand::ListTargets => format!("{} list-targets", idb),
            IdbCommand::Help => format!("{} --help", idb),
        }
    }
}

/// Characters that never need quoting
#[cfg(not(windows))]
const SHELL_SAFE: &str = "@%_+=:,./-";
#[cfg(windows)]
const SHELL_SAFE: &str = "@_+=:,./-\\";

/// Quote a value for the platform shell unless it only contains safe characters
///
/// POSIX `sh` gets single quotes; `cmd` treats those literally, so Windows
/// gets double quotes instead.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || SHELL_SAFE.contains(ch))
    {
        return value.to_string();
    }
    quote(value)
}

#[cfg(not(windows))]
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

#[cfg(windows)]
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
