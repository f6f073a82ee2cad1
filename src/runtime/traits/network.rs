// ABOUTME: Network operations trait for container handles.
// ABOUTME: Enumerate interfaces with hardware and IP addresses.

use super::shared_types::NetworkInterface;

/// Network operations: live interface enumeration.
pub trait NetworkOps {
    /// Interfaces in the order the network layer reports them.
    ///
    /// An interface with no addresses yet (e.g. DHCP pending) is still listed.
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("could not parse interface listing: {0}")]
    Parse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
