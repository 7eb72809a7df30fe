//! Interactive terminal frontend
//!
//! Notifications are printed as single lines (info on stdout, errors on
//! stderr). Prompts open a full-screen Ratatui modal; the blocking event loop
//! runs on tokio's blocking pool.

use std::io::IsTerminal;

use crossterm::style::Stylize;

use applaunch_app::LocalFrontend;
use applaunch_core::prelude::*;

use crate::input::prompt_input;
use crate::picker::pick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Frontend backed by the controlling terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalFrontend {
    color: bool,
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalFrontend {
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }
}

/// Render one notification line
pub fn format_notification(level: Level, message: &str, color: bool) -> String {
    let tag = match level {
        Level::Info => "info",
        Level::Error => "error",
    };

    if !color {
        return format!("{}: {}", tag, message);
    }

    let tag = match level {
        Level::Info => tag.green().bold(),
        Level::Error => tag.red().bold(),
    };
    format!("{}: {}", tag, message)
}

impl LocalFrontend for TerminalFrontend {
    async fn info(&self, message: &str) {
        println!("{}", format_notification(Level::Info, message, self.color));
    }

    async fn error(&self, message: &str) {
        eprintln!("{}", format_notification(Level::Error, message, self.color));
    }

    async fn error_with_link(&self, message: &str, link: &str) {
        eprintln!("{}", format_notification(Level::Error, message, self.color));
        if self.color {
            eprintln!("  see {}", link.underlined());
        } else {
            eprintln!("  see {}", link);
        }
    }

    async fn input(&self, placeholder: &str) -> Result<Option<String>> {
        let placeholder = placeholder.to_string();
        tokio::task::spawn_blocking(move || prompt_input(&placeholder))
            .await
            .map_err(|e| Error::terminal(format!("Input prompt task failed: {}", e)))?
    }

    async fn pick(&self, title: &str, items: &[String]) -> Result<Option<String>> {
        let title = title.to_string();
        let items = items.to_vec();
        tokio::task::spawn_blocking(move || pick(&title, &items))
            .await
            .map_err(|e| Error::terminal(format!("Picker task failed: {}", e)))?
    }
}
