// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (scripting), and JSON output modes.

use crate::executor::ProgramOutput;
use crate::identity::{ContainerIdentity, render};
use serde::Serialize;
use std::collections::BTreeMap;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Results only, no progress or warnings
    Quiet,
    /// One JSON document per result
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            eprintln!("{message}");
        }
    }

    /// Print a warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => emit_event(&JsonEvent {
                event: "warning",
                message,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => emit_event(&JsonEvent {
                event: "error",
                message,
            }),
        }
    }

    /// Print a resolved identity at the given detail level.
    pub fn identity(&self, identity: &ContainerIdentity, level: u32) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", render(identity, level)),
            OutputMode::Json => print_json(identity),
        }
    }

    /// Print a single scalar result such as a UUID.
    pub fn value(&self, key: &str, value: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{value}"),
            OutputMode::Json => print_json(&BTreeMap::from([(key, value)])),
        }
    }

    /// Print one address per line, or a JSON array.
    pub fn addresses(&self, addresses: &[String]) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                for address in addresses {
                    println!("{address}");
                }
            }
            OutputMode::Json => print_json(&addresses),
        }
    }

    /// Relay a program's streams: stdout to stdout, stderr to stderr.
    pub fn program(&self, output: &ProgramOutput) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                if !output.stdout.is_empty() {
                    println!("{}", output.stdout);
                }
                if !output.stderr.is_empty() {
                    eprint!("{}", output.stderr);
                }
            }
            OutputMode::Json => print_json(output),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        println!("{json}");
    }
}

fn emit_event(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        eprintln!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
}
