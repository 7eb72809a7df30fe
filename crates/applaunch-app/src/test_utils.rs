//! Test utilities for the app layer
//!
//! [`RecordingFrontend`] answers prompts from a script and records every
//! notification so tests can assert on exactly what the user saw.

use std::sync::Mutex;

use applaunch_core::prelude::*;

use crate::frontend::LocalFrontend;

#[derive(Debug, Default)]
struct Recorded {
    infos: Vec<String>,
    errors: Vec<String>,
    links: Vec<String>,
    inputs: Vec<String>,
    picks: Vec<Vec<String>>,
}

/// Frontend with scripted answers
///
/// Without a scripted answer, `input` and `pick` behave as dismissed.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    input_answer: Option<String>,
    pick_answer: Option<String>,
    recorded: Mutex<Recorded>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text submitted to the next input box
    pub fn with_input(mut self, text: &str) -> Self {
        self.input_answer = Some(text.to_string());
        self
    }

    /// Item chosen in the picker
    pub fn with_pick(mut self, item: &str) -> Self {
        self.pick_answer = Some(item.to_string());
        self
    }

    fn with_recorded<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        match self.recorded.lock() {
            Ok(mut recorded) => f(&mut recorded),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn infos(&self) -> Vec<String> {
        self.with_recorded(|r| r.infos.clone())
    }

    pub fn errors(&self) -> Vec<String> {
        self.with_recorded(|r| r.errors.clone())
    }

    /// Links attached to error notifications
    pub fn links(&self) -> Vec<String> {
        self.with_recorded(|r| r.links.clone())
    }

    /// Placeholders of the input boxes shown
    pub fn inputs(&self) -> Vec<String> {
        self.with_recorded(|r| r.inputs.clone())
    }

    /// Items offered by each picker shown
    pub fn picks(&self) -> Vec<Vec<String>> {
        self.with_recorded(|r| r.picks.clone())
    }
}

impl LocalFrontend for RecordingFrontend {
    async fn info(&self, message: &str) {
        self.with_recorded(|r| r.infos.push(message.to_string()));
    }

    async fn error(&self, message: &str) {
        self.with_recorded(|r| r.errors.push(message.to_string()));
    }

    async fn error_with_link(&self, message: &str, link: &str) {
        self.with_recorded(|r| {
            r.errors.push(message.to_string());
            r.links.push(link.to_string());
        });
    }

    async fn input(&self, placeholder: &str) -> Result<Option<String>> {
        self.with_recorded(|r| r.inputs.push(placeholder.to_string()));
        Ok(self.input_answer.clone())
    }

    async fn pick(&self, _title: &str, items: &[String]) -> Result<Option<String>> {
        self.with_recorded(|r| r.picks.push(items.to_vec()));
        Ok(self.pick_answer.clone())
    }
}
