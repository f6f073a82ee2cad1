// ABOUTME: Application-wide error types for corral.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::executor::RunError;
use crate::runtime::RuntimeError;
use crate::store::StoreError;
use crate::types::ContainerNameError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid container name: {0}")]
    InvalidContainerName(#[from] ContainerNameError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("identity of {0} only partially resolved")]
    Incomplete(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
