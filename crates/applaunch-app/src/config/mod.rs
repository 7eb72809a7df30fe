//! Configuration file parsing for App Launcher
//!
//! Supports:
//! - `.applaunch/config.toml` - Tool paths, behavior toggles, docs links

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
