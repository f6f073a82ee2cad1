// ABOUTME: Key-path configuration storage attached to a container.
// ABOUTME: Used to persist the container UUID and read connection settings.

mod lxc_file;
mod memory;

pub use lxc_file::LxcConfigFile;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Well-known configuration keys.
pub mod keys {
    pub const UUID: &str = "corral.uuid";
    pub const CONNECTION_URL: &str = "corral.connection.url";
    pub const CONNECTION_PORT: &str = "corral.connection.port";
    pub const CONNECTION_OPTIONS: &str = "corral.connection.options";
}

/// Read/write access to scalar string values addressed by dotted key paths.
///
/// Missing keys are `Ok(None)`; errors mean the underlying source could not
/// be read or written at all.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Errors from configuration storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("malformed configuration at line {line}: {content}")]
    Malformed { line: usize, content: String },

    #[error("configuration I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration store is read-only")]
    ReadOnly,
}

impl StoreError {
    /// Absent or malformed sources are treated as "every key unset" by callers.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Malformed { .. })
    }
}
