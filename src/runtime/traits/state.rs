// ABOUTME: State operations trait for container handles.
// ABOUTME: Query the container's name and running state.

use super::shared_types::ContainerState;

/// State operations: identify the container and report whether it runs.
pub trait StateOps {
    /// Name the lifecycle manager knows the container by.
    fn name(&self) -> &str;

    /// Current lifecycle state.
    fn state(&self) -> Result<ContainerState, StateError>;

    /// Convenience wrapper over [`StateOps::state`].
    fn is_running(&self) -> Result<bool, StateError> {
        Ok(self.state()? == ContainerState::Running)
    }
}

/// Errors from state queries.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
