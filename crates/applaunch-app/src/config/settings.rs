//! `.applaunch/config.toml` loading and project initialization

use super::types::Settings;
use applaunch_core::prelude::*;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub(crate) const APPLAUNCH_DIR: &str = ".applaunch";
const CONFIG_FILENAME: &str = "config.toml";

/// Workspace state is per-developer and stays out of version control
const STATE_IGNORE_LINE: &str = ".applaunch/state.toml";

const DEFAULT_CONFIG: &str = r#"# applaunch project settings

[behavior]
check_tools = true   # Probe adb / idb before each action
auto_detect = true   # Scan build.gradle / project.pbxproj when no id is stored

[tools]
# Commands or absolute paths for the platform tools
adb = "adb"
idb = "idb"

[docs]
# Shown when the tool probe fails
android_setup = "https://developer.android.com/tools/adb"
ios_setup = "https://fbidb.io/docs/installation"
"#;

pub(crate) fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(APPLAUNCH_DIR).join(CONFIG_FILENAME)
}

/// Load the project settings
///
/// Never fails: a missing file means defaults, an unreadable or malformed one
/// is reported at warn level and also yields defaults.
pub fn load_settings(project_root: &Path) -> Settings {
    let path = config_path(project_root);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No {:?}, using default settings", path);
            return Settings::default();
        }
        Err(e) => {
            warn!("Cannot read {:?}, using default settings: {}", path, e);
            return Settings::default();
        }
    };

    parse_settings(&content).unwrap_or_else(|e| {
        warn!("Ignoring {:?}: {}", path, e);
        Settings::default()
    })
}

fn parse_settings(content: &str) -> Result<Settings> {
    toml::from_str(content).map_err(|e| Error::config(e.to_string()))
}

/// Create `.applaunch/config.toml` and ignore the state file
///
/// Running it again leaves an edited config and the `.gitignore` as they are.
pub fn init_config_dir(project_root: &Path) -> Result<()> {
    let path = config_path(project_root);
    let dir = project_root.join(APPLAUNCH_DIR);

    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::config(format!("Failed to create {}: {}", dir.display(), e)))?;

    if path.exists() {
        debug!("Keeping existing {:?}", path);
    } else {
        std::fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", path.display(), e)))?;
        info!("Wrote default settings to {:?}", path);
    }

    ignore_state_file(project_root)
}

fn ignore_state_file(project_root: &Path) -> Result<()> {
    let gitignore = project_root.join(".gitignore");
    let existing = match std::fs::read_to_string(&gitignore) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(Error::config(format!("Failed to read .gitignore: {}", e))),
    };

    if existing.lines().any(covers_state_file) {
        return Ok(());
    }

    let separator = if existing.is_empty() || existing.ends_with('\n') {
        ""
    } else {
        "\n"
    };

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&gitignore)
        .and_then(|mut file| writeln!(file, "{}{}", separator, STATE_IGNORE_LINE))
        .map_err(|e| Error::config(format!("Failed to update .gitignore: {}", e)))?;

    info!("Added {} to .gitignore", STATE_IGNORE_LINE);
    Ok(())
}

/// Whether a `.gitignore` line already ignores the state file
fn covers_state_file(line: &str) -> bool {
    let pattern = line.split('#').next().unwrap_or_default().trim();
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);

    matches!(
        pattern,
        STATE_IGNORE_LINE | ".applaunch" | ".applaunch/" | ".applaunch/*" | ".applaunch/**"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use applaunch_core::Platform;
    use tempfile::tempdir;

    fn write_config(root: &Path, content: &str) {
        let path = config_path(root);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn gitignore(root: &Path) -> String {
        std::fs::read_to_string(root.join(".gitignore")).unwrap()
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert!(settings.behavior.check_tools);
        assert!(settings.behavior.auto_detect);
        assert_eq!(settings.tool(Platform::Android), "adb");
        assert_eq!(settings.tool(Platform::Ios), "idb");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        write_config(
            temp.path(),
            "[tools]\nadb = \"/opt/android-sdk/platform-tools/adb\"\n",
        );

        let settings = load_settings(temp.path());

        assert_eq!(
            settings.tool(Platform::Android),
            "/opt/android-sdk/platform-tools/adb"
        );
        assert_eq!(settings.tool(Platform::Ios), "idb");
        assert!(settings.behavior.check_tools);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        write_config(temp.path(), "[behavior\nauto_detect = false\n");

        let settings = load_settings(temp.path());
        assert!(settings.behavior.auto_detect);

        // Wrong value types are rejected the same way
        write_config(temp.path(), "[behavior]\nauto_detect = \"no\"\n");
        assert!(load_settings(temp.path()).behavior.auto_detect);
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();

        let written = std::fs::read_to_string(config_path(temp.path())).unwrap();
        let settings = parse_settings(&written).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.tools.adb, defaults.tools.adb);
        assert_eq!(settings.docs.ios_setup, defaults.docs.ios_setup);
        assert_eq!(gitignore(temp.path()), ".applaunch/state.toml\n");
    }

    #[test]
    fn test_init_keeps_edited_config() {
        let temp = tempdir().unwrap();
        init_config_dir(temp.path()).unwrap();
        write_config(temp.path(), "[behavior]\ncheck_tools = false\n");

        init_config_dir(temp.path()).unwrap();

        assert!(!load_settings(temp.path()).behavior.check_tools);
        assert_eq!(gitignore(temp.path()).matches(STATE_IGNORE_LINE).count(), 1);
    }

    #[test]
    fn test_init_appends_to_existing_gitignore() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(".gitignore"), "build/\n*.iml").unwrap();

        init_config_dir(temp.path()).unwrap();

        assert_eq!(
            gitignore(temp.path()),
            "build/\n*.iml\n.applaunch/state.toml\n"
        );
    }

    #[test]
    fn test_init_respects_directory_wide_ignore() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(".gitignore"), "/.applaunch/\n").unwrap();

        init_config_dir(temp.path()).unwrap();

        assert_eq!(gitignore(temp.path()), "/.applaunch/\n");
    }

    #[test]
    fn test_covers_state_file() {
        assert!(covers_state_file(".applaunch/state.toml"));
        assert!(covers_state_file("  .applaunch/state.toml   # per developer"));
        assert!(covers_state_file(".applaunch/**"));
        assert!(!covers_state_file("# .applaunch/state.toml"));
        assert!(!covers_state_file(".applaunch/config.toml"));
        assert!(!covers_state_file("state.toml"));
    }
}
