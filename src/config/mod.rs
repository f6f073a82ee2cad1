// ABOUTME: Agent configuration types and parsing for corral.yml.
// ABOUTME: Handles YAML parsing, discovery order, defaults and per-container config paths.

use crate::error::{Error, Result};
use crate::runtime::{DEFAULT_LXC_PATH, LXC_STORE_FILE, RuntimeType};
use crate::types::ContainerName;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "corral.yml";
pub const CONFIG_FILENAME_DIR: &str = ".corral/config.yml";
pub const SYSTEM_CONFIG: &str = "/etc/corral/agent.yml";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "CORRAL_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which runtime manages the containers.
    #[serde(default)]
    pub runtime: RuntimeType,

    /// LXC container directory (`lxc.lxcpath`).
    #[serde(default = "default_lxc_path")]
    pub lxc_path: PathBuf,

    /// Where per-container configuration files live for Docker and Podman.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Explicit runtime socket (overrides detection).
    #[serde(default)]
    pub socket: Option<String>,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

fn default_lxc_path() -> PathBuf {
    PathBuf::from(DEFAULT_LXC_PATH)
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("/var/lib/corral")
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            runtime: RuntimeType::default(),
            lxc_path: default_lxc_path(),
            state_dir: default_state_dir(),
            socket: None,
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults configuration.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_yaml(&content)
    }

    /// Find the configuration for an agent started in `dir`.
    ///
    /// Order: `$CORRAL_CONFIG`, `corral.yml`, `.corral/config.yml`, then
    /// `/etc/corral/agent.yml`. With none present the defaults are used.
    pub fn discover(dir: &Path) -> Result<Self> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::load(Path::new(&explicit));
        }

        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_DIR),
            PathBuf::from(SYSTEM_CONFIG),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration");
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "connect_timeout must be greater than zero".to_string(),
            ));
        }
        if !self.lxc_path.is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "lxc_path must be absolute: {}",
                self.lxc_path.display()
            )));
        }
        if !self.state_dir.is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "state_dir must be absolute: {}",
                self.state_dir.display()
            )));
        }
        if self.runtime == RuntimeType::Lxc && self.socket.is_some() {
            return Err(Error::InvalidConfig(
                "socket is only meaningful for docker or podman".to_string(),
            ));
        }
        Ok(())
    }

    /// File holding the UUID and connection settings of `name`.
    ///
    /// For LXC this is a sidecar next to the container's own `config`, which
    /// is never written.
    pub fn config_path_for(&self, name: &ContainerName) -> PathBuf {
        match self.runtime {
            RuntimeType::Lxc => self.lxc_path.join(name.as_str()).join(LXC_STORE_FILE),
            RuntimeType::Docker | RuntimeType::Podman => {
                self.state_dir.join(format!("{}.conf", name.as_str()))
            }
        }
    }
}
