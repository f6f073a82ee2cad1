// ABOUTME: Shared types used across the container handle traits.
// ABOUTME: ContainerState, NetworkInterface, ExecRequest, ExecOutput.

use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// Container lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Running,
    Stopped,
    Starting,
    Stopping,
    Frozen,
    Unknown,
}

impl ContainerState {
    /// Parse the state words printed by `lxc-info -s`.
    pub fn from_lxc(word: &str) -> Self {
        match word.trim().to_ascii_uppercase().as_str() {
            // THAWED is the transient state of a container leaving FROZEN.
            "RUNNING" | "THAWED" => ContainerState::Running,
            "STOPPED" => ContainerState::Stopped,
            "STARTING" => ContainerState::Starting,
            "STOPPING" | "ABORTING" => ContainerState::Stopping,
            "FROZEN" | "FREEZING" => ContainerState::Frozen,
            _ => ContainerState::Unknown,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ContainerState::Running => "running",
            ContainerState::Stopped => "stopped",
            ContainerState::Starting => "starting",
            ContainerState::Stopping => "stopping",
            ContainerState::Frozen => "frozen",
            ContainerState::Unknown => "unknown",
        };
        write!(f, "{word}")
    }
}

/// A network interface as seen from inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    /// Interface name (e.g. `eth0`).
    pub name: String,
    /// Hardware address, normalised to lowercase colon form.
    pub mac_address: Option<String>,
    /// Assigned addresses in the order reported.
    pub addresses: Vec<IpAddr>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac_address: None,
            addresses: Vec::new(),
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.name == "lo"
            || (!self.addresses.is_empty() && self.addresses.iter().all(IpAddr::is_loopback))
    }
}

/// A program invocation: argv is passed as a vector, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    /// Program to run, resolved inside the container.
    pub program: String,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl ExecRequest {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Result of running a program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code.
    pub exit_code: i64,
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
