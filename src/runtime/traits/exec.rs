// ABOUTME: Exec operations trait for container handles.
// ABOUTME: Execute a program with discrete arguments inside a running container.

use super::shared_types::{ExecOutput, ExecRequest};

/// Exec operations: run programs in the container.
pub trait ExecOps {
    /// Run the program to completion and capture its output.
    ///
    /// A non-zero exit status is not an error at this level; it is reported
    /// through [`ExecOutput::exit_code`].
    fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError>;
}

/// Errors from exec operations.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("program not found: {0}")]
    ProgramNotFound(String),

    #[error("exec failed: {0}")]
    Failed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
