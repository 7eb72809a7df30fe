//! applaunch-tui - Terminal prompts for App Launcher
//!
//! Implements the interactive [`applaunch_app::Frontend`]: Ratatui modals for
//! the device picker and the identifier input box, plus plain-line
//! notifications.

pub mod frontend;
pub mod input;
pub mod picker;
pub mod terminal;
pub mod theme;

// Re-export main entry points
pub use frontend::TerminalFrontend;
pub use input::prompt_input;
pub use picker::pick;
pub use terminal::install_panic_hook;
