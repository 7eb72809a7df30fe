//! File logging for the launcher
//!
//! Pickers and notifications own the terminal, so tracing output goes to a
//! daily rolling file under the platform data directory. `APPLAUNCH_LOG`
//! takes a standard `EnvFilter` directive:
//!
//! ```bash
//! APPLAUNCH_LOG=debug applaunch android restart
//! APPLAUNCH_LOG=applaunch_daemon=trace applaunch ios get-id
//! ```

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_ENV: &str = "APPLAUNCH_LOG";
const LOG_FILE_PREFIX: &str = "applaunch.log";

/// Tracing targets of the binary and the workspace crates
const TARGETS: [&str; 5] = [
    "app_launcher",
    "applaunch_core",
    "applaunch_daemon",
    "applaunch_app",
    "applaunch_tui",
];

/// `info` for our own targets, `warn` for dependencies
fn default_filter() -> String {
    let mut directives: Vec<String> = TARGETS.iter().map(|t| format!("{t}=info")).collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Install the global subscriber writing to the rolling log file
pub fn init() -> Result<()> {
    let dir = log_directory();
    std::fs::create_dir_all(&dir)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &dir,
            LOG_FILE_PREFIX,
        ))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), dir = %dir.display(), "applaunch started");
    Ok(())
}

/// Directory holding the rolling log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("app-launcher")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_names_every_crate() {
        let filter = default_filter();

        for target in TARGETS {
            assert!(filter.contains(&format!("{target}=info")), "{target}");
        }
        assert!(filter.ends_with(",warn"));
        // The crate's own tracing target is the package name with underscores
        assert!(TARGETS.contains(&env!("CARGO_PKG_NAME").replace('-', "_").as_str()));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_log_directory_is_app_specific() {
        assert!(log_directory().ends_with("app-launcher/logs"));
    }
}
