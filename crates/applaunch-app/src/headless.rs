//! Headless mode - NDJSON notifications for scripts and CI
//!
//! Every notification is written as one JSON object per line. Prompts cannot
//! be answered without a terminal, so they resolve immediately as dismissed
//! and emit a `prompt_skipped` event instead.
//!
//! # Example Output
//!
//! ```json
//! {"event":"info","message":"com.acme.demo application id detected","timestamp":1704700001000}
//! {"event":"prompt_skipped","kind":"pick","title":"Choose target device","timestamp":1704700002000}
//! {"event":"error","message":"Cannot choose target device to run command on","link":null,"timestamp":1704700002001}
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use applaunch_core::prelude::*;

use crate::frontend::LocalFrontend;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    Info {
        message: String,
        timestamp: i64,
    },

    Error {
        message: String,
        link: Option<String>,
        timestamp: i64,
    },

    /// A prompt that was dismissed because no user is attached
    PromptSkipped {
        kind: String,
        title: String,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn info(message: &str) -> Self {
        Self::Info {
            message: message.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: &str, link: Option<&str>) -> Self {
        Self::Error {
            message: message.to_string(),
            link: link.map(str::to_string),
            timestamp: Self::now(),
        }
    }

    pub fn prompt_skipped(kind: &str, title: &str) -> Self {
        Self::PromptSkipped {
            kind: kind.to_string(),
            title: title.to_string(),
            timestamp: Self::now(),
        }
    }
}

/// Frontend that writes [`HeadlessEvent`]s as NDJSON
pub struct HeadlessFrontend<W: Write = io::Stdout> {
    out: Mutex<W>,
}

impl HeadlessFrontend<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for HeadlessFrontend<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> HeadlessFrontend<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, event: &HeadlessEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let Ok(mut out) = self.out.lock() else {
            error!("Headless output poisoned");
            return;
        };

        if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
            error!("Failed to write headless event: {}", e);
        }
    }
}

impl<W: Write> LocalFrontend for HeadlessFrontend<W> {
    async fn info(&self, message: &str) {
        self.emit(&HeadlessEvent::info(message));
    }

    async fn error(&self, message: &str) {
        self.emit(&HeadlessEvent::error(message, None));
    }

    async fn error_with_link(&self, message: &str, link: &str) {
        self.emit(&HeadlessEvent::error(message, Some(link)));
    }

    async fn input(&self, placeholder: &str) -> Result<Option<String>> {
        warn!("Input prompt skipped in headless mode: {}", placeholder);
        self.emit(&HeadlessEvent::prompt_skipped("input", placeholder));
        Ok(None)
    }

    async fn pick(&self, title: &str, items: &[String]) -> Result<Option<String>> {
        warn!(
            "Picker skipped in headless mode: {} ({} items)",
            title,
            items.len()
        );
        self.emit(&HeadlessEvent::prompt_skipped("pick", title));
        Ok(None)
    }
}
