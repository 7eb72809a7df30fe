//! Test utilities for daemon types
//!
//! Provides a scripted [`FakeRunner`] and helpers for creating test Device
//! objects.

use std::collections::HashMap;
use std::sync::Mutex;

use applaunch_core::prelude::*;
use applaunch_core::Device;

use crate::process::{CommandOutput, LocalCommandRunner};

/// Scripted reply for one command string
#[derive(Debug, Clone)]
enum FakeResponse {
    Output(String),
    Failure(String),
    SpawnError(String),
}

/// Command runner that records calls and replies from a script
///
/// Commands without a scripted reply succeed with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: HashMap<String, FakeResponse>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` with `stdout` and a zero exit status
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), FakeResponse::Output(stdout.to_string()));
        self
    }

    /// Make `command` exit non-zero with `output` as its error text
    pub fn fail(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), FakeResponse::Failure(output.to_string()));
        self
    }

    /// Make `command` fail to spawn
    pub fn spawn_error(mut self, command: &str, reason: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            FakeResponse::SpawnError(reason.to_string()),
        );
        self
    }

    /// Commands run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl LocalCommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.to_string());
        }

        match self.responses.get(command) {
            None => Ok(CommandOutput::default()),
            Some(FakeResponse::Output(stdout)) => Ok(CommandOutput::new(stdout.clone())),
            Some(FakeResponse::Failure(output)) => {
                Err(Error::command_failed(command, Some(1), output))
            }
            Some(FakeResponse::SpawnError(reason)) => Err(Error::command_spawn(command, reason)),
        }
    }
}

/// Creates an iOS test device running "iOS 17.0".
///
/// # Arguments
/// * `id` - Device UDID
/// * `name` - Human-readable device name
/// * `booted` - Whether the target is booted / connected
/// * `physical` - Physical hardware rather than a simulator
pub fn ios_device(id: &str, name: &str, booted: bool, physical: bool) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        booted,
        physical,
        os_version: Some("iOS 17.0".to_string()),
    }
}

/// Render `adb devices` output listing the given serials.
pub fn adb_devices_output(serials: &[&str]) -> String {
    let mut output = String::from("List of devices attached\n");
    for serial in serials {
        output.push_str(serial);
        output.push_str("\tdevice\n");
    }
    output
}
