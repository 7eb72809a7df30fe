//! Target device selection
//!
//! Devices are re-listed on every invocation. An explicit `--device`
//! specifier bypasses the picker entirely; otherwise the platform decides
//! whether a lone device is chosen without asking.

use applaunch_core::prelude::*;
use applaunch_core::Device;
use applaunch_daemon::{discover_devices, find_device, LocalCommandRunner};

use crate::actions::PlatformActions;
use crate::frontend::LocalFrontend;

pub const PICKER_TITLE: &str = "Choose target device";

/// Choose the device to run an operation on
///
/// Returns `Ok(None)` when nothing is connected or the picker is dismissed.
/// A failing list command and an unmatched `preselect` are errors.
pub async fn select_device<R, F, A>(
    runner: &R,
    frontend: &F,
    actions: &A,
    preselect: Option<&str>,
) -> Result<Option<Device>>
where
    R: LocalCommandRunner,
    F: LocalFrontend,
    A: PlatformActions + ?Sized,
{
    let devices = discover_devices(runner, actions.platform(), actions.tool()).await?;

    if let Some(specifier) = preselect {
        return match find_device(&devices, specifier) {
            Some(device) => {
                debug!("Preselected {} for {:?}", device.id, specifier);
                Ok(Some(device.clone()))
            }
            None => {
                warn!("No {} device matches {:?}", actions.platform(), specifier);
                Err(Error::NoDevice)
            }
        };
    }

    match devices.as_slice() {
        [] => Ok(None),
        [only] if actions.auto_select_single() => Ok(Some(only.clone())),
        _ => {
            let labels: Vec<String> = devices.iter().map(|d| actions.device_label(d)).collect();
            let Some(label) = frontend.pick(PICKER_TITLE, &labels).await? else {
                debug!("Device picker dismissed");
                return Ok(None);
            };
            Ok(actions.resolve_label(&devices, &label).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{AndroidActions, IosActions};
    use crate::test_utils::RecordingFrontend;
    use applaunch_daemon::test_utils::{adb_devices_output, FakeRunner};

    const IDB_OUTPUT: &str = "\
iPhone 15 | SIM-1 | Shutdown | simulator | iOS 17.2 | x86_64 | No Companion Connected
Tacos | PHONE-1 | Booted | device | iOS 17.3 | arm64 | No Companion Connected
";

    fn adb_runner(serials: &[&str]) -> FakeRunner {
        FakeRunner::new().respond("adb devices", &adb_devices_output(serials))
    }

    #[tokio::test]
    async fn test_android_no_devices() {
        let runner = adb_runner(&[]);
        let frontend = RecordingFrontend::new();

        let device = select_device(&runner, &frontend, &AndroidActions::new("adb"), None)
            .await
            .unwrap();

        assert!(device.is_none());
        assert!(frontend.picks().is_empty());
    }

    #[tokio::test]
    async fn test_android_single_device_auto_selected() {
        let runner = adb_runner(&["emulator-5554"]);
        let frontend = RecordingFrontend::new();

        let device = select_device(&runner, &frontend, &AndroidActions::new("adb"), None)
            .await
            .unwrap();

        assert_eq!(device.unwrap().id, "emulator-5554");
        assert!(frontend.picks().is_empty());
    }

    #[tokio::test]
    async fn test_android_many_devices_prompt() {
        let runner = adb_runner(&["emulator-5554", "R58M12ABCDE"]);
        let frontend = RecordingFrontend::new().with_pick("R58M12ABCDE");

        let device = select_device(&runner, &frontend, &AndroidActions::new("adb"), None)
            .await
            .unwrap();

        assert_eq!(device.unwrap().id, "R58M12ABCDE");
        assert_eq!(
            frontend.picks(),
            vec![vec!["emulator-5554".to_string(), "R58M12ABCDE".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_picker_dismissed() {
        let runner = adb_runner(&["emulator-5554", "R58M12ABCDE"]);
        let frontend = RecordingFrontend::new();

        let device = select_device(&runner, &frontend, &AndroidActions::new("adb"), None)
            .await
            .unwrap();

        assert!(device.is_none());
    }

    #[tokio::test]
    async fn test_ios_always_prompts_with_sorted_labels() {
        let runner = FakeRunner::new().respond("idb list-targets", IDB_OUTPUT);
        let frontend = RecordingFrontend::new().with_pick("Tacos | iOS 17.3 | connected");

        let device = select_device(&runner, &frontend, &IosActions::new("idb"), None)
            .await
            .unwrap();

        assert_eq!(device.unwrap().id, "PHONE-1");
        assert_eq!(
            frontend.picks(),
            vec![vec![
                "Tacos | iOS 17.3 | connected".to_string(),
                "iPhone 15 | iOS 17.2".to_string(),
            ]]
        );
    }

    #[tokio::test]
    async fn test_preselect_bypasses_picker() {
        let runner = FakeRunner::new().respond("idb list-targets", IDB_OUTPUT);
        let frontend = RecordingFrontend::new();

        let device = select_device(&runner, &frontend, &IosActions::new("idb"), Some("iphone"))
            .await
            .unwrap();

        assert_eq!(device.unwrap().id, "SIM-1");
        assert!(frontend.picks().is_empty());
    }

    #[tokio::test]
    async fn test_preselect_without_match() {
        let runner = adb_runner(&["emulator-5554"]);
        let frontend = RecordingFrontend::new();

        let result = select_device(
            &runner,
            &frontend,
            &AndroidActions::new("adb"),
            Some("pixel"),
        )
        .await;

        assert!(matches!(result, Err(Error::NoDevice)));
    }

    #[tokio::test]
    async fn test_list_failure_is_error() {
        let runner = FakeRunner::new().fail("adb devices", "adb: command not found");
        let frontend = RecordingFrontend::new();

        let result = select_device(&runner, &frontend, &AndroidActions::new("adb"), None).await;

        assert_eq!(result.unwrap_err().to_string(), "adb: command not found");
    }
}
