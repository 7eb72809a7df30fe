//! Device discovery using `adb devices` and `idb list-targets`

use std::cmp::Ordering;

use applaunch_core::prelude::*;
use applaunch_core::{Device, Platform};

use crate::commands::{AdbCommand, CommandContext, CommandTemplate, IdbCommand};
use crate::process::LocalCommandRunner;

/// Separator between fields of `idb list-targets` lines and picker labels
const FIELD_SEPARATOR: char = '|';

/// Minimum number of fields on a usable `idb list-targets` line
const IDB_MIN_FIELDS: usize = 5;

/// List devices for a platform, ordered for presentation
///
/// iOS targets are sorted physical-first, then booted-first, then by name.
/// Android devices keep the order `adb` reports them in.
pub async fn discover_devices<R: LocalCommandRunner>(
    runner: &R,
    platform: Platform,
    tool: &str,
) -> Result<Vec<Device>> {
    let ctx = CommandContext::new(tool, "", "");

    let devices = match platform {
        Platform::Android => {
            let output = runner.run(&AdbCommand::Devices.render(&ctx)).await?;
            parse_adb_devices(&output.stdout)
        }
        Platform::Ios => {
            let output = runner.run(&IdbCommand::ListTargets.render(&ctx)).await?;
            let mut devices = parse_idb_targets(&output.stdout);
            sort_ios_devices(&mut devices);
            devices
        }
    };

    info!("Discovered {} {} devices", devices.len(), platform);
    Ok(devices)
}

/// Header line `adb devices` prints before the serials
const ADB_DEVICES_HEADER: &str = "List of devices";

/// Parse the output of `adb devices`
///
/// Every non-blank line other than the `List of devices attached` header
/// contributes its first token (the serial). Lines printed while adb starts
/// its server (`* daemon started successfully`) come before the header and
/// are skipped.
pub fn parse_adb_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with('*') && !line.starts_with(ADB_DEVICES_HEADER))
        .filter_map(|line| line.split_whitespace().next())
        .map(Device::from_serial)
        .collect()
}

/// Parse the output of `idb list-targets`
///
/// Format: `name | udid | state | type | os version | arch | address`
pub fn parse_idb_targets(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
            if fields.len() < IDB_MIN_FIELDS {
                debug!("Skipping unrecognised idb target line: {}", line);
                return None;
            }

            Some(Device {
                name: fields[0].to_string(),
                id: fields[1].to_string(),
                booted: fields[2] == "Booted",
                physical: fields[3] == "device",
                os_version: Some(fields[4].to_string()),
            })
        })
        .collect()
}

/// Order iOS targets: physical before simulators, booted before shutdown,
/// then by name
pub fn sort_ios_devices(devices: &mut [Device]) {
    devices.sort_by(compare_ios_devices);
}

fn compare_ios_devices(left: &Device, right: &Device) -> Ordering {
    right
        .physical
        .cmp(&left.physical)
        .then_with(|| right.booted.cmp(&left.booted))
        .then_with(|| left.name.cmp(&right.name))
}

/// Picker label for an iOS target: `name | os version [| connected]`
pub fn ios_label(device: &Device) -> String {
    let mut label = format!(
        "{} {} {}",
        device.name,
        FIELD_SEPARATOR,
        device.os_version.as_deref().unwrap_or("unknown")
    );
    if device.booted {
        label.push_str(" | connected");
    }
    label
}

/// Device name portion of a picker label (text before the first separator)
pub fn name_from_label(label: &str) -> &str {
    match label.find(FIELD_SEPARATOR) {
        Some(index) => label[..index].trim(),
        None => label.trim(),
    }
}

/// Resolve a picker label back to a device by name
///
/// When two targets share a name the first one in `devices` wins; the label
/// carries no identifier to disambiguate them.
pub fn resolve_by_name<'a>(devices: &'a [Device], label: &str) -> Option<&'a Device> {
    let name = name_from_label(label);
    devices.iter().find(|device| device.name == name)
}

/// Find a device matching a user-supplied specifier (id or name)
pub fn find_device<'a>(devices: &'a [Device], specifier: &str) -> Option<&'a Device> {
    devices.iter().find(|d| d.matches(specifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ios_device, FakeRunner};

    const IDB_OUTPUT: &str = "\
iPhone 15 | 1111-AAAA | Shutdown | simulator | iOS 17.2 | x86_64 | No Companion Connected
Tacos | 00008110-0004 | Booted | device | iOS 17.3 | arm64 | No Companion Connected
iPhone 14 | 2222-BBBB | Booted | simulator | iOS 16.4 | x86_64 | No Companion Connected
";

    #[test]
    fn test_parse_adb_devices() {
        let output = "List of devices attached\nemulator-5554\tdevice\nR58M12ABCDE\tdevice\n\n";
        let devices = parse_adb_devices(output);

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "emulator-5554");
        assert_eq!(devices[1].id, "R58M12ABCDE");
    }

    #[test]
    fn test_parse_adb_devices_header_only() {
        assert!(parse_adb_devices("List of devices attached\n\n").is_empty());
        assert!(parse_adb_devices("").is_empty());
    }

    #[test]
    fn test_parse_adb_devices_trims_tokens() {
        let output = "List of devices attached\n   emulator-5556   offline  \n";
        let devices = parse_adb_devices(output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "emulator-5556");
    }

    #[test]
    fn test_parse_adb_devices_skips_daemon_banner() {
        let output = "* daemon not running; starting now at tcp:5037\n* daemon started successfully\nList of devices attached\nemulator-5554\tdevice\n\n";
        let devices = parse_adb_devices(output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "emulator-5554");
    }

    #[test]
    fn test_parse_adb_devices_banner_only() {
        let output = "* daemon not running; starting now at tcp:5037\n* daemon started successfully\nList of devices attached\n\n";
        assert!(parse_adb_devices(output).is_empty());
    }

    #[test]
    fn test_parse_idb_targets() {
        let devices = parse_idb_targets(IDB_OUTPUT);

        assert_eq!(devices.len(), 3);
        assert_eq!(devices[1].name, "Tacos");
        assert_eq!(devices[1].id, "00008110-0004");
        assert!(devices[1].booted);
        assert!(devices[1].physical);
        assert_eq!(devices[1].os_version.as_deref(), Some("iOS 17.3"));
        assert!(!devices[0].booted);
        assert!(!devices[0].physical);
    }

    #[test]
    fn test_parse_idb_targets_skips_short_lines() {
        let devices = parse_idb_targets("garbage line\niPad | 3333 | Booted | simulator | iOS 17\n");
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "iPad");
    }

    #[test]
    fn test_sort_ios_devices() {
        let mut devices = vec![
            ios_device("4", "Zulu Sim", true, false),
            ios_device("1", "Phone B", false, true),
            ios_device("2", "Alpha Sim", false, false),
            ios_device("3", "Phone A", true, true),
            ios_device("5", "Bravo Sim", true, false),
            ios_device("6", "Phone C", true, true),
        ];

        sort_ios_devices(&mut devices);

        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Phone A", "Phone C", "Phone B", "Bravo Sim", "Zulu Sim", "Alpha Sim"]
        );
    }

    #[test]
    fn test_sort_physical_before_booted_simulator() {
        let mut devices = vec![
            ios_device("sim", "Sim", true, false),
            ios_device("phys-off", "Off Phone", false, true),
            ios_device("phys-on", "On Phone", true, true),
        ];

        sort_ios_devices(&mut devices);

        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["phys-on", "phys-off", "sim"]);
    }

    #[test]
    fn test_ios_label() {
        let booted = ios_device("1", "iPhone 15", true, false);
        assert_eq!(ios_label(&booted), "iPhone 15 | iOS 17.0 | connected");

        let shutdown = ios_device("2", "iPhone 14", false, false);
        assert_eq!(ios_label(&shutdown), "iPhone 14 | iOS 17.0");
    }

    #[test]
    fn test_resolve_by_name() {
        let devices = vec![
            ios_device("1", "iPhone 15", true, false),
            ios_device("2", "iPhone 14", false, false),
        ];

        let resolved = resolve_by_name(&devices, "iPhone 14 | iOS 17.0").unwrap();
        assert_eq!(resolved.id, "2");
        assert!(resolve_by_name(&devices, "iPad | iOS 17.0").is_none());
    }

    #[test]
    fn test_resolve_by_name_duplicate_names_picks_first() {
        let devices = vec![
            ios_device("first", "iPhone 15", true, false),
            ios_device("second", "iPhone 15", false, false),
        ];

        let resolved = resolve_by_name(&devices, &ios_label(&devices[1])).unwrap();
        assert_eq!(resolved.id, "first");
    }

    #[test]
    fn test_find_device() {
        let devices = vec![
            Device::from_serial("emulator-5554"),
            Device::from_serial("R58M12ABCDE"),
        ];
        assert_eq!(find_device(&devices, "r58m12abcde").unwrap().id, "R58M12ABCDE");
        assert_eq!(find_device(&devices, "emulator").unwrap().id, "emulator-5554");
        assert!(find_device(&devices, "iphone").is_none());
    }

    #[tokio::test]
    async fn test_discover_android_devices() {
        let runner = FakeRunner::new().respond(
            "adb devices",
            "List of devices attached\nemulator-5554\tdevice\n",
        );

        let devices = discover_devices(&runner, Platform::Android, "adb")
            .await
            .unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(runner.calls(), vec!["adb devices"]);
    }

    #[tokio::test]
    async fn test_discover_ios_devices_sorted() {
        let runner = FakeRunner::new().respond("idb list-targets", IDB_OUTPUT);

        let devices = discover_devices(&runner, Platform::Ios, "idb").await.unwrap();

        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Tacos", "iPhone 14", "iPhone 15"]);
    }

    #[tokio::test]
    async fn test_discover_propagates_tool_failure() {
        let runner = FakeRunner::new().fail("adb devices", "adb: command not found");

        let err = discover_devices(&runner, Platform::Android, "adb")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "adb: command not found");
    }
}
