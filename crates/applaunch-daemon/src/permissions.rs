//! Granted permission discovery from `adb shell dumpsys package`

/// Extract granted permission names from `dumpsys package` output
///
/// A permission line looks like
/// `android.permission.CAMERA: granted=true, flags=[ USER_SET ]`. The same
/// permission shows up once per user, so duplicates are dropped while the
/// first-seen order is kept.
pub fn parse_granted_permissions(output: &str) -> Vec<String> {
    let mut permissions: Vec<String> = Vec::new();

    for line in output.lines() {
        if !line.contains("permission") || !line.contains("granted=true") {
            continue;
        }

        let name = line.split(':').next().unwrap_or_default().trim();
        if name.is_empty() || permissions.iter().any(|p| p == name) {
            continue;
        }
        permissions.push(name.to_string());
    }

    permissions
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMPSYS_FIXTURE: &str = "\
Packages:
  Package [com.acme.demo] (5c1f0e2):
    userId=10153
    requested permissions:
      android.permission.INTERNET
      android.permission.CAMERA
    install permissions:
      android.permission.INTERNET: granted=true
    User 0: ceDataInode=123 installed=true hidden=false
      runtime permissions:
        android.permission.CAMERA: granted=true, flags=[ USER_SET|USER_SENSITIVE_WHEN_GRANTED ]
        android.permission.ACCESS_FINE_LOCATION: granted=false, flags=[ USER_SET ]
    User 10: ceDataInode=0 installed=true hidden=false
      runtime permissions:
        android.permission.CAMERA: granted=true, flags=[ USER_SET ]
";

    #[test]
    fn test_parse_granted_permissions() {
        let permissions = parse_granted_permissions(DUMPSYS_FIXTURE);
        assert_eq!(
            permissions,
            vec!["android.permission.INTERNET", "android.permission.CAMERA"]
        );
    }

    #[test]
    fn test_parse_no_granted_permissions() {
        let output = "requested permissions:\n  android.permission.CAMERA\n";
        assert!(parse_granted_permissions(output).is_empty());
        assert!(parse_granted_permissions("").is_empty());
    }
}
