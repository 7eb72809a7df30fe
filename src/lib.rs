//! App Launcher Library
//!
//! Wires the command line to the launcher: resolves project roots, loads
//! settings, locates the platform tool and picks the frontend.

pub mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use applaunch_app::{
    for_platform, init_config_dir, load_settings, ActionOutcome, HeadlessFrontend, IdentifierStore,
    Launcher, LocalFrontend, Operation, Settings, WorkspaceStore,
};
use applaunch_core::prelude::*;
use applaunch_core::Platform;
use applaunch_daemon::{LocalCommandRunner, ShellRunner, ToolAvailability};
use applaunch_tui::TerminalFrontend;

pub use cli::{Args, Command};

/// Run one invocation of the binary
pub async fn run(args: Args) -> Result<ExitCode> {
    let roots = resolve_roots(&args.projects)?;
    let primary = roots[0].clone();

    let Some((platform, operation)) = args.command.target() else {
        init_config_dir(&primary).context("Failed to initialize project config")?;
        println!("Initialized {}", primary.join(".applaunch").display());
        return Ok(ExitCode::SUCCESS);
    };

    let settings = load_settings(&primary);
    let tools = ToolAvailability::check(&settings.tools.adb, &settings.tools.idb);
    if let Some(message) = tools.unavailable_message(platform) {
        debug!("{}", message);
    }
    let tool = tools.tool_command(platform, settings.tool(platform));

    let runner = ShellRunner::new();
    let store = WorkspaceStore::new(&primary);
    let target = Target {
        platform,
        tool,
        roots,
        device: args.device,
    };

    if args.headless {
        launch(runner, HeadlessFrontend::new(), store, settings, target, operation).await
    } else {
        launch(runner, TerminalFrontend::new(), store, settings, target, operation).await
    }
}

/// Where and with what an operation runs
#[derive(Debug, Clone)]
pub struct Target {
    pub platform: Platform,
    /// Tool command substituted into templates
    pub tool: String,
    pub roots: Vec<PathBuf>,
    pub device: Option<String>,
}

/// Run `operation` and map its outcome to the process exit code
pub async fn launch<R, F, S>(
    runner: R,
    frontend: F,
    store: S,
    settings: Settings,
    target: Target,
    operation: Operation,
) -> Result<ExitCode>
where
    R: LocalCommandRunner,
    F: LocalFrontend,
    S: IdentifierStore,
{
    let actions = for_platform(target.platform, &target.tool);
    let launcher = Launcher::new(runner, frontend, store, actions, settings)
        .with_roots(target.roots)
        .with_device(target.device);

    let outcome = launcher.run(operation).await?;
    Ok(exit_code(outcome))
}

pub fn exit_code(outcome: ActionOutcome) -> ExitCode {
    match outcome {
        ActionOutcome::Failed => ExitCode::FAILURE,
        ActionOutcome::Succeeded | ActionOutcome::Skipped => ExitCode::SUCCESS,
    }
}

/// Canonicalize the project roots, defaulting to the current directory
pub fn resolve_roots(projects: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if projects.is_empty() {
        let cwd = std::env::current_dir()?;
        return Ok(vec![canonical(&cwd)?]);
    }

    projects.iter().map(|p| canonical(p)).collect()
}

fn canonical(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| {
        Error::config(format!(
            "Project path {} is not accessible: {}",
            path.display(),
            e
        ))
    })
}
