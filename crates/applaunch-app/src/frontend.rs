//! User interaction surface
//!
//! The orchestrator never talks to a terminal directly: notifications,
//! free-text input and single-choice pickers go through a [`LocalFrontend`].
//! The interactive terminal frontend lives in `applaunch-tui`; the headless
//! one in [`crate::headless`].

use applaunch_core::prelude::*;

/// Notifications and prompts shown to the user
///
/// `input` and `pick` return `Ok(None)` when the user dismisses the prompt.
#[trait_variant::make(Frontend: Send)]
pub trait LocalFrontend {
    /// Informational notification
    async fn info(&self, message: &str);

    /// Error notification
    async fn error(&self, message: &str);

    /// Error notification pointing at setup documentation
    async fn error_with_link(&self, message: &str, link: &str);

    /// Free-text input box
    async fn input(&self, placeholder: &str) -> Result<Option<String>>;

    /// Single-choice picker over `items`
    async fn pick(&self, title: &str, items: &[String]) -> Result<Option<String>>;
}
