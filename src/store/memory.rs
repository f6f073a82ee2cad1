// ABOUTME: In-memory ConfigStore for embedding and tests.
// ABOUTME: Can simulate a missing, malformed or read-only source.

use super::{ConfigStore, StoreError};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    ReadWrite,
    ReadOnly,
    Missing,
    Malformed,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
    mode: Mode,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Mutex::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            mode: Mode::ReadWrite,
        }
    }

    /// Reads succeed, writes fail.
    pub fn read_only(self) -> Self {
        Self {
            mode: Mode::ReadOnly,
            ..self
        }
    }

    /// Every access fails as if the backing file did not exist.
    pub fn missing() -> Self {
        Self {
            mode: Mode::Missing,
            ..Self::default()
        }
    }

    /// Every access fails as if the backing file could not be parsed.
    pub fn malformed() -> Self {
        Self {
            mode: Mode::Malformed,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.lock().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.mode {
            Mode::Missing => Err(StoreError::NotFound(PathBuf::from("<memory>"))),
            Mode::Malformed => Err(StoreError::Malformed {
                line: 1,
                content: "<memory>".to_string(),
            }),
            Mode::ReadWrite | Mode::ReadOnly => Ok(()),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        if self.mode == Mode::ReadOnly {
            return Err(StoreError::ReadOnly);
        }
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
