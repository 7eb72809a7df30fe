//! Tool availability checking
//!
//! Locates the `adb` (Android SDK platform-tools) and `idb` (Facebook iOS
//! Development Bridge) executables, and runs the lightweight probe commands
//! used as a prerequisite check before each action.

use std::path::{Path, PathBuf};

use applaunch_core::prelude::*;
use applaunch_core::Platform;

use crate::commands::{AdbCommand, CommandContext, CommandTemplate, IdbCommand};
use crate::process::LocalCommandRunner;

/// Resolved locations of the external tools
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    /// Path to adb if found
    pub adb_path: Option<PathBuf>,

    /// Path to idb if found
    pub idb_path: Option<PathBuf>,
}

impl ToolAvailability {
    /// Locate both tools (run once at startup)
    ///
    /// `adb` and `idb` are the configured commands; a bare name is looked up
    /// in PATH and, for adb, in the Android SDK directories.
    pub fn check(adb: &str, idb: &str) -> Self {
        let adb_path = Self::get_adb_paths(adb)
            .into_iter()
            .find_map(|candidate| locate(&candidate));
        let idb_path = locate(idb);

        debug!("adb located at {:?}, idb located at {:?}", adb_path, idb_path);

        Self { adb_path, idb_path }
    }

    /// Get list of paths to try for the adb command
    fn get_adb_paths(configured: &str) -> Vec<String> {
        let mut paths = vec![configured.to_string()];

        // Check ANDROID_HOME/platform-tools/adb
        if let Ok(android_home) = std::env::var("ANDROID_HOME") {
            paths.push(format!("{}/platform-tools/adb", android_home));
        }

        // Check ANDROID_SDK_ROOT/platform-tools/adb
        if let Ok(sdk_root) = std::env::var("ANDROID_SDK_ROOT") {
            paths.push(format!("{}/platform-tools/adb", sdk_root));
        }

        paths
    }

    pub fn is_available(&self, platform: Platform) -> bool {
        match platform {
            Platform::Android => self.adb_path.is_some(),
            Platform::Ios => self.idb_path.is_some(),
        }
    }

    /// Command to use for a platform: the resolved path, else the configured name
    pub fn tool_command(&self, platform: Platform, configured: &str) -> String {
        let resolved = match platform {
            Platform::Android => self.adb_path.as_deref(),
            Platform::Ios => self.idb_path.as_deref(),
        };

        match resolved {
            // Keep what the user configured when it already resolves through PATH
            Some(path) if path.file_name().map(|n| n == configured).unwrap_or(false) => {
                configured.to_string()
            }
            Some(path) => path.display().to_string(),
            None => configured.to_string(),
        }
    }

    /// Get user-friendly message for an unavailable tool
    pub fn unavailable_message(&self, platform: Platform) -> Option<&'static str> {
        if self.is_available(platform) {
            return None;
        }

        match platform {
            Platform::Android => {
                Some("adb not found. Install Android SDK platform-tools or set ANDROID_HOME.")
            }
            Platform::Ios => Some("idb not found. Install idb-companion and the fb-idb client."),
        }
    }
}

/// Find an executable by name in PATH, or accept an existing file path
fn locate(command: &str) -> Option<PathBuf> {
    let path = Path::new(command);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    which::which(command)
        .inspect_err(|e| trace!("{} not in PATH: {}", command, e))
        .ok()
}

/// Probe command proving the platform tool can run at all
pub fn probe_command(platform: Platform, tool: &str) -> String {
    let ctx = CommandContext::new(tool, "", "");
    match platform {
        Platform::Android => AdbCommand::Version.render(&ctx),
        Platform::Ios => IdbCommand::Help.render(&ctx),
    }
}

/// Run the probe for a platform tool
pub async fn probe_tool<R: LocalCommandRunner>(
    runner: &R,
    platform: Platform,
    tool: &str,
) -> Result<()> {
    runner.run(&probe_command(platform, tool)).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeRunner;
    use serial_test::serial;

    #[test]
    fn test_tool_availability_default() {
        let availability = ToolAvailability::default();
        assert!(!availability.is_available(Platform::Android));
        assert!(!availability.is_available(Platform::Ios));
        assert!(availability.unavailable_message(Platform::Android).is_some());
        assert!(availability.unavailable_message(Platform::Ios).is_some());
    }

    #[test]
    fn test_available_no_message() {
        let availability = ToolAvailability {
            adb_path: Some(PathBuf::from("/usr/bin/adb")),
            idb_path: None,
        };
        assert!(availability.unavailable_message(Platform::Android).is_none());
        assert!(availability.unavailable_message(Platform::Ios).is_some());
    }

    #[test]
    #[serial]
    fn test_adb_paths_includes_android_home() {
        std::env::set_var("ANDROID_HOME", "/test/android");
        let paths = ToolAvailability::get_adb_paths("adb");
        assert!(paths.contains(&"/test/android/platform-tools/adb".to_string()));
        std::env::remove_var("ANDROID_HOME");
    }

    #[test]
    #[serial]
    fn test_adb_paths_includes_sdk_root() {
        std::env::set_var("ANDROID_SDK_ROOT", "/test/sdk");
        let paths = ToolAvailability::get_adb_paths("adb");
        assert!(paths.iter().any(|p| p.contains("/test/sdk")));
        std::env::remove_var("ANDROID_SDK_ROOT");
    }

    #[test]
    #[serial]
    fn test_adb_paths_starts_with_configured() {
        let paths = ToolAvailability::get_adb_paths("my-adb");
        assert_eq!(paths[0], "my-adb");
    }

    #[test]
    fn test_tool_command_prefers_configured_name_on_path() {
        let availability = ToolAvailability {
            adb_path: Some(PathBuf::from("/usr/bin/adb")),
            idb_path: None,
        };
        assert_eq!(availability.tool_command(Platform::Android, "adb"), "adb");
        assert_eq!(availability.tool_command(Platform::Ios, "idb"), "idb");
    }

    #[test]
    fn test_tool_command_uses_sdk_path() {
        let availability = ToolAvailability {
            adb_path: Some(PathBuf::from("/sdk/platform-tools/adb")),
            idb_path: None,
        };
        assert_eq!(
            availability.tool_command(Platform::Android, "adb-custom"),
            "/sdk/platform-tools/adb"
        );
    }

    #[test]
    fn test_locate_missing_file_path() {
        assert!(locate("/definitely/not/here/adb").is_none());
    }

    #[test]
    fn test_probe_commands() {
        assert_eq!(probe_command(Platform::Android, "adb"), "adb version");
        assert_eq!(probe_command(Platform::Ios, "idb"), "idb --help");
    }

    #[tokio::test]
    async fn test_probe_tool_failure() {
        let runner = FakeRunner::new().fail("adb version", "sh: adb: not found");
        let result = probe_tool(&runner, Platform::Android, "adb").await;
        assert!(result.is_err());

        let runner = FakeRunner::new();
        assert!(probe_tool(&runner, Platform::Ios, "idb").await.is_ok());
    }
}
