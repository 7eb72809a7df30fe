//! Domain types shared by every crate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Mobile platform an application identifier and a device belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Key under which the platform's identifier is persisted
    pub fn storage_key(&self) -> &'static str {
        match self {
            Platform::Android => "app-application-id",
            Platform::Ios => "app-application-id-ios",
        }
    }

    /// Name of the external tool that drives this platform
    pub fn tool_name(&self) -> &'static str {
        match self {
            Platform::Android => "adb",
            Platform::Ios => "idb",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(Error::config(format!("Unknown platform: {}", other))),
        }
    }
}

/// A target device, re-queried from the platform tool on every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// Serial (adb) or UDID (idb)
    pub id: String,

    /// Human-readable name; adb only knows the serial
    pub name: String,

    /// Booted simulator or connected device
    pub booted: bool,

    /// Physical hardware rather than a simulator
    pub physical: bool,

    /// OS version reported by the tool, if any
    pub os_version: Option<String>,
}

impl Device {
    /// A device as reported by `adb devices`: listed means connected
    pub fn from_serial(serial: impl Into<String>) -> Self {
        let id = serial.into();
        Self {
            name: id.clone(),
            id,
            booted: true,
            physical: true,
            os_version: None,
        }
    }

    /// Check if device matches a device specifier
    ///
    /// The specifier can be:
    /// - Exact device ID (case-insensitive)
    /// - Device name (case-insensitive partial match)
    pub fn matches(&self, specifier: &str) -> bool {
        let spec_lower = specifier.to_lowercase();

        if self.id.to_lowercase() == spec_lower {
            return true;
        }

        self.name.to_lowercase().contains(&spec_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_storage_keys_do_not_collide() {
        assert_eq!(Platform::Android.storage_key(), "app-application-id");
        assert_eq!(Platform::Ios.storage_key(), "app-application-id-ios");
        assert_ne!(Platform::Android.storage_key(), Platform::Ios.storage_key());
    }

    #[test]
    fn test_platform_display_and_parse() {
        assert_eq!(Platform::Ios.to_string(), "iOS");
        assert_eq!(Platform::Android.to_string(), "Android");
        assert_eq!("IOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert!("windows".parse::<Platform>().is_err());
    }

    #[test]
    fn test_device_from_serial() {
        let device = Device::from_serial("emulator-5554");
        assert_eq!(device.id, "emulator-5554");
        assert_eq!(device.name, "emulator-5554");
        assert!(device.booted);
        assert!(device.os_version.is_none());
    }

    #[test]
    fn test_device_matches() {
        let device = Device {
            id: "00008101-ABC123".to_string(),
            name: "iPhone 15 Pro Max".to_string(),
            booted: true,
            physical: true,
            os_version: Some("iOS 17.2".to_string()),
        };

        assert!(device.matches("00008101-abc123"));
        assert!(device.matches("iphone 15"));
        assert!(device.matches("Pro Max"));
        assert!(!device.matches("Pixel"));
    }
}
