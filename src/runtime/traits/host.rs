// ABOUTME: Host naming trait for container handles.
// ABOUTME: Container-reported hostname and the supervising host's hostname.

/// Naming operations.
pub trait HostOps {
    /// Hostname as reported from inside the container.
    fn hostname(&self) -> Result<String, HostError>;

    /// Hostname of the machine supervising the container.
    fn parent_hostname(&self) -> Result<String, HostError> {
        gethostname::gethostname()
            .into_string()
            .map_err(|raw| HostError::InvalidHostname(raw.to_string_lossy().into_owned()))
    }
}

/// Errors from hostname queries.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("hostname is not valid UTF-8: {0}")]
    InvalidHostname(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
