// ABOUTME: Runtime error types with SNAFU pattern.
// ABOUTME: Unifies detection, connection and lookup errors for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::StateError;

/// Unified error for opening a container handle.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("runtime connection failed: {message}"))]
    Connection { message: String },

    #[snafu(display("container lookup failed: {source}"))]
    Lookup { source: StateError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// No container runtime found on the system.
    NoRuntimeFound,
    /// Failed to connect to runtime socket.
    ConnectionFailed,
    /// The named container does not exist.
    ContainerNotFound,
    /// Runtime operation error.
    RuntimeOperation,
}

impl RuntimeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RuntimeErrorKind {
        match self {
            RuntimeError::Detection { .. } => RuntimeErrorKind::NoRuntimeFound,
            RuntimeError::Connection { .. } => RuntimeErrorKind::ConnectionFailed,
            RuntimeError::Lookup { source } => match source {
                StateError::ContainerNotFound(_) => RuntimeErrorKind::ContainerNotFound,
                StateError::Runtime(_) => RuntimeErrorKind::RuntimeOperation,
            },
        }
    }

    /// Returns connection error details if this is a connection failure.
    pub fn connection_details(&self) -> Option<&str> {
        match self {
            RuntimeError::Connection { message } => Some(message),
            _ => None,
        }
    }
}

impl From<DetectionError> for RuntimeError {
    fn from(source: DetectionError) -> Self {
        RuntimeError::Detection { source }
    }
}

impl From<StateError> for RuntimeError {
    fn from(source: StateError) -> Self {
        RuntimeError::Lookup { source }
    }
}
