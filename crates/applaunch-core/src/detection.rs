//! Application identifier detection
//!
//! Scans well-known build files of an Android or iOS project for the
//! declared application identifier. Detection is heuristic: it looks for
//! lines containing the platform's declaration marker and extracts the first
//! dotted identifier on such a line, without parsing Gradle or Xcode syntax.
//! Every failure is soft - unreadable files are logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::identifier::find_identifier;
use crate::types::Platform;

/// Gradle build files that may declare `applicationId`, relative to a root
const GRADLE_BUILD_FILES: &[&str] = &[
    "app/build.gradle",
    "android/app/build.gradle",
    "app/build.gradle.kts",
    "android/app/build.gradle.kts",
];

/// Nested directory holding the native iOS project in cross-platform repos
const IOS_DIRECTORY: &str = "ios";

const XCODE_PROJECT_EXTENSION: &str = "xcodeproj";
const XCODE_PROJECT_FILE: &str = "project.pbxproj";

const ANDROID_MARKER: &str = "applicationId ";
const IOS_MARKER: &str = "PRODUCT_BUNDLE_IDENTIFIER";

/// Detect the application identifier declared in any of the project roots
///
/// Roots are scanned in order and, within a root, candidate files in their
/// fixed order. Returns an empty string when nothing is found.
pub fn detect(platform: Platform, roots: &[PathBuf]) -> String {
    for root in roots {
        for candidate in candidate_files(platform, root) {
            if let Some(id) = detect_in_file(platform, &candidate) {
                debug!("Detected {} id {} in {:?}", platform, id, candidate);
                return id;
            }
        }
    }

    debug!("No {} application id found in {:?}", platform, roots);
    String::new()
}

/// Build the ordered list of files worth scanning under a root
pub fn candidate_files(platform: Platform, root: &Path) -> Vec<PathBuf> {
    match platform {
        Platform::Android => GRADLE_BUILD_FILES.iter().map(|f| root.join(f)).collect(),
        Platform::Ios => {
            let mut files = xcode_project_files(root);
            files.extend(xcode_project_files(&root.join(IOS_DIRECTORY)));
            files
        }
    }
}

/// List `*.xcodeproj/project.pbxproj` files directly under `dir`, by bundle name
fn xcode_project_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            trace!("Cannot read directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut bundles: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == XCODE_PROJECT_EXTENSION)
                .unwrap_or(false)
        })
        .collect();
    bundles.sort();

    bundles
        .into_iter()
        .map(|bundle| bundle.join(XCODE_PROJECT_FILE))
        .filter(|file| file.is_file())
        .collect()
}

/// Scan a single file; `None` on read errors or when no marker line matches
pub fn detect_in_file(platform: Platform, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => find_in_content(platform, &content),
        Err(e) => {
            debug!(
                "Cannot open file {:?}, will not get application id from it: {}",
                path, e
            );
            None
        }
    }
}

/// Extract the first declared identifier from file content
pub fn find_in_content(platform: Platform, content: &str) -> Option<String> {
    let marker = match platform {
        Platform::Android => ANDROID_MARKER,
        Platform::Ios => IOS_MARKER,
    };

    content
        .lines()
        .filter(|line| line.contains(marker))
        .find_map(find_identifier)
        .map(|id| id.to_string())
}
