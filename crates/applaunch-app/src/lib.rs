//! applaunch-app - Configuration and action orchestration for App Launcher
//!
//! Ties the identifier store, device selection and command execution
//! together behind a [`Frontend`] so the same flow drives the interactive
//! terminal UI and headless mode.

pub mod actions;
pub mod config;
pub mod executor;
pub mod frontend;
pub mod headless;
pub mod orchestrator;
pub mod selector;
pub mod store;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Re-export primary types
pub use actions::{for_platform, AndroidActions, IosActions, Operation, PlatformActions};
pub use config::{init_config_dir, load_settings, Settings};
pub use executor::ActionOutcome;
pub use frontend::{Frontend, LocalFrontend};
pub use headless::HeadlessFrontend;
pub use orchestrator::Launcher;
pub use store::{IdentifierStore, MemoryStore, WorkspaceStore};
