//! Configuration types for App Launcher
//!
//! Defines `Settings` (`.applaunch/config.toml`) and its sections.

use serde::{Deserialize, Serialize};
use url::Url;

use applaunch_core::prelude::*;
use applaunch_core::Platform;

const DEFAULT_ANDROID_SETUP_DOCS: &str = "https://developer.android.com/tools/adb";
const DEFAULT_IOS_SETUP_DOCS: &str = "https://fbidb.io/docs/installation";

/// Application settings (.applaunch/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub tools: ToolSettings,

    #[serde(default)]
    pub docs: DocsSettings,
}

impl Settings {
    /// Configured command for a platform's tool
    pub fn tool(&self, platform: Platform) -> &str {
        match platform {
            Platform::Android => &self.tools.adb,
            Platform::Ios => &self.tools.idb,
        }
    }

    /// Setup documentation link shown when the tool probe fails
    ///
    /// Falls back to the built-in link when the configured one is not a URL.
    pub fn setup_docs(&self, platform: Platform) -> String {
        let (configured, default) = match platform {
            Platform::Android => (&self.docs.android_setup, DEFAULT_ANDROID_SETUP_DOCS),
            Platform::Ios => (&self.docs.ios_setup, DEFAULT_IOS_SETUP_DOCS),
        };

        match Url::parse(configured) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Ignoring invalid {} docs link {:?}: {}", platform, configured, e);
                default.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Probe the platform tool before each action
    #[serde(default = "default_true")]
    pub check_tools: bool,

    /// Scan build files when no identifier is stored
    #[serde(default = "default_true")]
    pub auto_detect: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            check_tools: true,
            auto_detect: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolSettings {
    #[serde(default = "default_adb")]
    pub adb: String,

    #[serde(default = "default_idb")]
    pub idb: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            adb: default_adb(),
            idb: default_idb(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsSettings {
    #[serde(default = "default_android_setup")]
    pub android_setup: String,

    #[serde(default = "default_ios_setup")]
    pub ios_setup: String,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            android_setup: default_android_setup(),
            ios_setup: default_ios_setup(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_adb() -> String {
    "adb".to_string()
}

fn default_idb() -> String {
    "idb".to_string()
}

fn default_android_setup() -> String {
    DEFAULT_ANDROID_SETUP_DOCS.to_string()
}

fn default_ios_setup() -> String {
    DEFAULT_IOS_SETUP_DOCS.to_string()
}
