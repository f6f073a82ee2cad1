// ABOUTME: Socket resolution for Docker and Podman on the local host.
// ABOUTME: Picks the configured or default socket and checks that a daemon is listening there.

use super::types::{RuntimeInfo, RuntimeType};
use std::path::Path;

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no {runtime} socket found at {path}")]
    NoRuntimeFound { runtime: RuntimeType, path: String },

    #[error("{0} is not served over a socket")]
    NotSocketBased(RuntimeType),
}

/// Resolve the socket for an explicitly configured runtime.
///
/// An explicit `socket` wins; otherwise the runtime's default path is used,
/// preferring a rootless Podman socket when one exists. The chosen path must
/// exist.
pub fn resolve_socket(
    runtime_type: RuntimeType,
    socket: Option<&str>,
) -> Result<RuntimeInfo, DetectionError> {
    let socket_path = socket_path_for(runtime_type, socket)?;

    if !Path::new(&socket_path).exists() {
        return Err(DetectionError::NoRuntimeFound {
            runtime: runtime_type,
            path: socket_path,
        });
    }

    Ok(RuntimeInfo {
        runtime_type,
        socket_path,
    })
}

/// The socket path `resolve_socket` would use, without checking it.
pub fn socket_path_for(
    runtime_type: RuntimeType,
    socket: Option<&str>,
) -> Result<String, DetectionError> {
    match (runtime_type, socket) {
        (RuntimeType::Lxc, _) => Err(DetectionError::NotSocketBased(runtime_type)),
        (_, Some(path)) => Ok(path.to_string()),
        (RuntimeType::Podman, None) => Ok(get_uid()
            .map(|uid| format!("/run/user/{}/podman/podman.sock", uid))
            .filter(|p| Path::new(p).exists())
            .unwrap_or_else(|| ROOTFUL_PODMAN.to_string())),
        (RuntimeType::Docker, None) => Ok(DOCKER_SOCKET.to_string()),
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}
