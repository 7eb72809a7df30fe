//! App Launcher - adb/idb lifecycle commands for the app under development
//!
//! This is the binary entry point. All logic lives in the library.

use std::process::ExitCode;

use clap::Parser;

use app_launcher::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    applaunch_core::logging::init()?;
    applaunch_tui::install_panic_hook();

    let code = app_launcher::run(args).await?;
    Ok(code)
}
