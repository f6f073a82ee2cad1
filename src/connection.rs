// ABOUTME: Opens a container handle and its config store from the agent configuration.
// ABOUTME: Picks the LXC backend or a bollard connection based on the configured runtime.

use crate::config::Config;
use crate::error::Result;
use crate::runtime::{
    BollardContainer, ContainerHandle, LxcContainer, RuntimeError, RuntimeType, resolve_socket,
};
use crate::store::LxcConfigFile;
use crate::types::ContainerName;

/// A container handle from whichever backend the configuration selects.
#[derive(Debug)]
pub enum OpenedContainer {
    Lxc(LxcContainer),
    Bollard(BollardContainer),
}

impl OpenedContainer {
    pub fn handle(&self) -> &dyn ContainerHandle {
        match self {
            OpenedContainer::Lxc(c) => c,
            OpenedContainer::Bollard(c) => c,
        }
    }

    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            OpenedContainer::Lxc(_) => RuntimeType::Lxc,
            OpenedContainer::Bollard(c) => c.runtime_type(),
        }
    }
}

/// Open `name` with the runtime named in `config`.
///
/// For Docker and Podman the socket is taken from `config.socket` or the
/// runtime's default location. The runtime is asked for the container's state
/// before the handle is returned, so an unknown container fails here with
/// [`RuntimeErrorKind::ContainerNotFound`](crate::runtime::RuntimeErrorKind).
pub fn open_container(config: &Config, name: ContainerName) -> Result<OpenedContainer> {
    let opened = connect(config, name)?;
    let state = opened.handle().state().map_err(RuntimeError::from)?;
    tracing::debug!(container = opened.handle().name(), %state, "container found");
    Ok(opened)
}

fn connect(config: &Config, name: ContainerName) -> Result<OpenedContainer> {
    match config.runtime {
        RuntimeType::Lxc => {
            tracing::debug!(
                container = %name,
                lxc_path = %config.lxc_path.display(),
                "opening lxc container"
            );
            Ok(OpenedContainer::Lxc(LxcContainer::with_lxc_path(
                name,
                &config.lxc_path,
            )))
        }
        runtime_type @ (RuntimeType::Docker | RuntimeType::Podman) => {
            let info = resolve_socket(runtime_type, config.socket.as_deref())
                .map_err(RuntimeError::from)?;
            tracing::debug!(
                container = %name,
                runtime = %info.runtime_type,
                socket = %info.socket_path,
                "connecting to runtime"
            );
            let container = BollardContainer::connect(&info, name, config.connect_timeout)?;
            Ok(OpenedContainer::Bollard(container))
        }
    }
}

/// The config store holding the UUID and connection settings of `name`.
///
/// The agent owns this file and creates it on demand: a `corral.conf` sidecar
/// in the LXC container directory, or `<state_dir>/<name>.conf` for Docker and
/// Podman. The LXC container's own `config` is never opened.
pub fn config_store_for(config: &Config, name: &ContainerName) -> Result<LxcConfigFile> {
    let store = LxcConfigFile::new(config.config_path_for(name));
    if store.create_if_missing()? {
        tracing::info!(path = %store.path().display(), "created container state file");
    }
    Ok(store)
}
