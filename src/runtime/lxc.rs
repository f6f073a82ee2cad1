// ABOUTME: LXC container handle driving the lxc-info and lxc-attach tools.
// ABOUTME: Every call is synchronous; argv is passed as a vector, never via a shell.

use super::parse::{merge_addresses, parse_ip_addr, parse_ip_link};
use super::traits::{
    ContainerState, ExecError, ExecOps, ExecOutput, ExecRequest, HostError, HostOps,
    NetworkError, NetworkInterface, NetworkOps, StateError, StateOps,
};
use crate::store::LxcConfigFile;
use crate::types::ContainerName;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Default LXC container directory.
pub const DEFAULT_LXC_PATH: &str = "/var/lib/lxc";

/// File next to the container's LXC config holding corral's own keys.
///
/// LXC rejects unknown keys in `config`, so nothing is ever written there.
pub const LXC_STORE_FILE: &str = "corral.conf";

/// Exit status lxc-attach reports when the program could not be executed.
const EXEC_NOT_FOUND: i32 = 127;

/// A running (or stopped) LXC system container addressed by name.
#[derive(Debug, Clone)]
pub struct LxcContainer {
    name: ContainerName,
    lxc_path: PathBuf,
    info_bin: OsString,
    attach_bin: OsString,
}

impl LxcContainer {
    pub fn new(name: ContainerName) -> Self {
        Self::with_lxc_path(name, DEFAULT_LXC_PATH)
    }

    pub fn with_lxc_path(name: ContainerName, lxc_path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            lxc_path: lxc_path.into(),
            info_bin: "lxc-info".into(),
            attach_bin: "lxc-attach".into(),
        }
    }

    /// Override the tool binaries (for non-standard installs).
    pub fn with_tools(
        mut self,
        info_bin: impl Into<OsString>,
        attach_bin: impl Into<OsString>,
    ) -> Self {
        self.info_bin = info_bin.into();
        self.attach_bin = attach_bin.into();
        self
    }

    pub fn lxc_path(&self) -> &Path {
        &self.lxc_path
    }

    /// Path of the LXC configuration file. Read by LXC only.
    pub fn config_path(&self) -> PathBuf {
        self.lxc_path.join(self.name.as_str()).join("config")
    }

    /// Path of the sidecar holding the UUID and connection settings.
    pub fn store_path(&self) -> PathBuf {
        self.lxc_path.join(self.name.as_str()).join(LXC_STORE_FILE)
    }

    /// Configuration store backed by the sidecar file.
    ///
    /// The file is not created here; see [`LxcConfigFile::create_if_missing`].
    pub fn config_store(&self) -> LxcConfigFile {
        LxcConfigFile::new(self.store_path())
    }

    fn info(&self, extra: &[&str]) -> std::io::Result<Output> {
        Command::new(&self.info_bin)
            .arg("-P")
            .arg(&self.lxc_path)
            .arg("-n")
            .arg(self.name.as_str())
            .args(extra)
            .output()
    }

    fn attach(&self, argv: &[&str]) -> std::io::Result<Output> {
        tracing::debug!(container = %self.name, ?argv, "lxc-attach");
        Command::new(&self.attach_bin)
            .arg("-P")
            .arg(&self.lxc_path)
            .arg("-n")
            .arg(self.name.as_str())
            .arg("--")
            .args(argv)
            .output()
    }

    /// Run a fixed helper inside the container, requiring success.
    fn attach_checked(&self, argv: &[&str]) -> Result<String, String> {
        let output = self
            .attach(argv)
            .map_err(|e| format!("failed to run {}: {e}", self.attach_bin.to_string_lossy()))?;
        if !output.status.success() {
            return Err(format!(
                "`{}` exited with {}: {}",
                argv.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn require_running(&self) -> Result<(), String> {
        match self.state() {
            Ok(ContainerState::Running) => Ok(()),
            Ok(state) => Err(format!("{} is {state}", self.name)),
            Err(e) => Err(e.to_string()),
        }
    }
}

impl StateOps for LxcContainer {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn state(&self) -> Result<ContainerState, StateError> {
        let output = self
            .info(&["-s", "-H"])
            .map_err(|e| StateError::Runtime(format!("failed to run lxc-info: {e}")))?;

        if !output.status.success() {
            return Err(StateError::ContainerNotFound(self.name.to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        // Older lxc-info ignores -H and prints "State:   RUNNING".
        let word = stdout
            .lines()
            .next()
            .map(|l| l.rsplit(':').next().unwrap_or(l))
            .unwrap_or_default();
        Ok(ContainerState::from_lxc(word))
    }
}

impl NetworkOps for LxcContainer {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, NetworkError> {
        self.require_running()
            .map_err(NetworkError::ContainerNotRunning)?;

        let links = self
            .attach_checked(&["ip", "-o", "link", "show"])
            .map_err(NetworkError::Runtime)?;
        let addrs = self
            .attach_checked(&["ip", "-o", "addr", "show"])
            .map_err(NetworkError::Runtime)?;

        let interfaces = parse_ip_link(&links).map_err(NetworkError::Parse)?;
        let addresses = parse_ip_addr(&addrs).map_err(NetworkError::Parse)?;
        Ok(merge_addresses(interfaces, addresses))
    }
}

impl HostOps for LxcContainer {
    fn hostname(&self) -> Result<String, HostError> {
        self.require_running()
            .map_err(HostError::ContainerNotRunning)?;

        let out = self
            .attach_checked(&["hostname"])
            .map_err(HostError::Runtime)?;
        Ok(out.trim().to_string())
    }
}

impl ExecOps for LxcContainer {
    fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        let output = self.attach(&request.argv()).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExecError::Runtime(format!(
                "{} is not installed",
                self.attach_bin.to_string_lossy()
            )),
            _ => ExecError::Runtime(e.to_string()),
        })?;

        let exit_code = match output.status.code() {
            Some(code) => code,
            None => {
                return Err(ExecError::Failed(format!(
                    "terminated by signal: {}",
                    output.status
                )));
            }
        };

        if exit_code == EXEC_NOT_FOUND {
            return Err(ExecError::ProgramNotFound(request.program.clone()));
        }

        Ok(ExecOutput {
            exit_code: i64::from(exit_code),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
