// ABOUTME: Validated container name as accepted by lxc-* tools and the Docker API.
// ABOUTME: Rejects empty names, path separators and leading dashes or dots.

use std::fmt;
use thiserror::Error;

/// Longest name LXC accepts for a container directory.
const MAX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerNameError {
    #[error("container name cannot be empty")]
    Empty,

    #[error("container name exceeds maximum length of 64 characters")]
    TooLong,

    #[error("container name cannot start with '{0}'")]
    BadStart(char),

    #[error("invalid character in container name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl ContainerName {
    pub fn new(value: &str) -> Result<Self, ContainerNameError> {
        if value.is_empty() {
            return Err(ContainerNameError::Empty);
        }

        if value.len() > MAX_LEN {
            return Err(ContainerNameError::TooLong);
        }

        if let Some(first) = value.chars().next()
            && (first == '-' || first == '.')
        {
            return Err(ContainerNameError::BadStart(first));
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(ContainerNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContainerName {
    type Err = ContainerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
