// ABOUTME: Bollard-based container handle for Docker and Podman containers.
// ABOUTME: Blocking facade: owns a current-thread tokio runtime and drives each call to completion.

use super::error::RuntimeError;
use super::traits::{
    ContainerState, ExecError, ExecOps, ExecOutput, ExecRequest, HostError, HostOps,
    NetworkError, NetworkInterface, NetworkOps, StateError, StateOps,
};
use super::types::{RuntimeInfo, RuntimeType};
use crate::types::{ContainerName, MacAddress};
use bollard::Docker;
use bollard::exec::StartExecOptions;
use bollard::models::ContainerInspectResponse;
use bollard::query_parameters::InspectContainerOptions;
use futures::StreamExt;
use std::net::IpAddr;
use std::time::Duration;
use tokio::runtime::Runtime;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn status_of(e: &bollard::errors::Error) -> Option<(u16, &str)> {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => Some((*status_code, message.as_str())),
        _ => None,
    }
}

fn map_state_error(e: bollard::errors::Error, name: &str) -> StateError {
    match status_of(&e) {
        Some((404, _)) => StateError::ContainerNotFound(name.to_string()),
        _ => StateError::Runtime(e.to_string()),
    }
}

fn map_network_error(e: bollard::errors::Error, name: &str) -> NetworkError {
    match status_of(&e) {
        Some((404, _)) => NetworkError::ContainerNotFound(name.to_string()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_host_error(e: bollard::errors::Error, name: &str) -> HostError {
    match status_of(&e) {
        Some((404, _)) => HostError::ContainerNotFound(name.to_string()),
        _ => HostError::Runtime(e.to_string()),
    }
}

fn map_exec_create_error(e: bollard::errors::Error) -> ExecError {
    match status_of(&e) {
        Some((404, message)) => ExecError::ContainerNotFound(message.to_string()),
        Some((409, message)) => ExecError::ContainerNotRunning(message.to_string()),
        _ => ExecError::Runtime(e.to_string()),
    }
}

fn map_exec_start_error(e: bollard::errors::Error) -> ExecError {
    match status_of(&e) {
        Some((409, message)) => ExecError::ContainerNotRunning(message.to_string()),
        _ => ExecError::Failed(e.to_string()),
    }
}

// =============================================================================
// BollardContainer
// =============================================================================

/// A Docker or Podman container reached through the Docker-compatible API.
pub struct BollardContainer {
    client: Docker,
    runtime: Runtime,
    runtime_type: RuntimeType,
    name: ContainerName,
}

impl std::fmt::Debug for BollardContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BollardContainer")
            .field("runtime_type", &self.runtime_type)
            .field("name", &self.name)
            .finish()
    }
}

impl BollardContainer {
    /// Connect to the runtime socket described by `info`.
    pub fn connect(
        info: &RuntimeInfo,
        name: ContainerName,
        timeout: Duration,
    ) -> Result<Self, RuntimeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RuntimeError::Connection {
                message: format!("failed to start I/O runtime: {e}"),
            })?;

        let client = {
            let _guard = runtime.enter();
            Docker::connect_with_unix(
                &info.socket_path,
                timeout.as_secs(),
                bollard::API_DEFAULT_VERSION,
            )
            .map_err(|e| RuntimeError::Connection {
                message: format!("{}: {e}", info.socket_path),
            })?
        };

        Ok(Self {
            client,
            runtime,
            runtime_type: info.runtime_type,
            name,
        })
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    fn inspect(&self) -> Result<ContainerInspectResponse, bollard::errors::Error> {
        self.runtime.block_on(
            self.client
                .inspect_container(self.name.as_str(), None::<InspectContainerOptions>),
        )
    }

    async fn exec_async(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        let opts = bollard::models::ExecConfig {
            cmd: Some(request.argv().into_iter().map(String::from).collect()),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            ..Default::default()
        };

        let exec_id = self
            .client
            .create_exec(self.name.as_str(), opts)
            .await
            .map_err(map_exec_create_error)?
            .id;

        let start = StartExecOptions {
            detach: false,
            ..Default::default()
        };
        let result = self
            .client
            .start_exec(&exec_id, Some(start))
            .await
            .map_err(map_exec_start_error)?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        if let bollard::exec::StartExecResults::Attached { mut output, .. } = result {
            while let Some(item) = output.next().await {
                match item {
                    Ok(bollard::container::LogOutput::StdOut { message }) => {
                        stdout.extend(message);
                    }
                    Ok(bollard::container::LogOutput::StdErr { message }) => {
                        stderr.extend(message);
                    }
                    Ok(_) => {}
                    Err(e) => return Err(ExecError::Failed(e.to_string())),
                }
            }
        }

        let details = self
            .client
            .inspect_exec(&exec_id)
            .await
            .map_err(|e| ExecError::Runtime(e.to_string()))?;
        let exit_code = details.exit_code.unwrap_or(0);

        if is_missing_program(exit_code, &stdout, &stderr) {
            return Err(ExecError::ProgramNotFound(request.program.clone()));
        }

        Ok(ExecOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

/// The OCI runtime reports a missing executable with 126/127 and a
/// "not found" message on the attached streams.
fn is_missing_program(exit_code: i64, stdout: &[u8], stderr: &[u8]) -> bool {
    match exit_code {
        127 => true,
        126 => [stdout, stderr]
            .iter()
            .any(|s| String::from_utf8_lossy(s).contains("not found")),
        _ => false,
    }
}

impl StateOps for BollardContainer {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn state(&self) -> Result<ContainerState, StateError> {
        let details = self
            .inspect()
            .map_err(|e| map_state_error(e, self.name.as_str()))?;

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status)
            .map(|s| match s {
                bollard::models::ContainerStateStatusEnum::CREATED => ContainerState::Stopped,
                bollard::models::ContainerStateStatusEnum::RUNNING => ContainerState::Running,
                bollard::models::ContainerStateStatusEnum::PAUSED => ContainerState::Frozen,
                bollard::models::ContainerStateStatusEnum::RESTARTING => ContainerState::Starting,
                bollard::models::ContainerStateStatusEnum::REMOVING => ContainerState::Stopping,
                bollard::models::ContainerStateStatusEnum::EXITED => ContainerState::Stopped,
                bollard::models::ContainerStateStatusEnum::DEAD => ContainerState::Stopped,
                _ => ContainerState::Unknown,
            })
            .unwrap_or(ContainerState::Unknown);

        Ok(state)
    }
}

impl NetworkOps for BollardContainer {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, NetworkError> {
        let details = self
            .inspect()
            .map_err(|e| map_network_error(e, self.name.as_str()))?;

        let mut networks: Vec<_> = details
            .network_settings
            .and_then(|s| s.networks)
            .unwrap_or_default()
            .into_iter()
            .collect();
        // The API returns a map; sort so repeated enumerations agree.
        networks.sort_by(|a, b| a.0.cmp(&b.0));

        let interfaces = networks
            .into_iter()
            .map(|(name, endpoint)| {
                let mut iface = NetworkInterface::new(name);
                iface.mac_address = endpoint
                    .mac_address
                    .as_deref()
                    .and_then(|m| MacAddress::parse(m).ok())
                    .filter(|m| !m.is_zero())
                    .map(|m| m.to_string());
                iface.addresses = [endpoint.ip_address, endpoint.global_ipv6_address]
                    .into_iter()
                    .flatten()
                    .filter_map(|a| a.parse::<IpAddr>().ok())
                    .collect();
                iface
            })
            .collect();

        Ok(interfaces)
    }
}

impl HostOps for BollardContainer {
    fn hostname(&self) -> Result<String, HostError> {
        let details = self
            .inspect()
            .map_err(|e| map_host_error(e, self.name.as_str()))?;

        Ok(details
            .config
            .and_then(|c| c.hostname)
            .unwrap_or_default())
    }
}

impl ExecOps for BollardContainer {
    fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        self.runtime.block_on(self.exec_async(request))
    }
}
