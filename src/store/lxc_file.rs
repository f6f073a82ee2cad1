// ABOUTME: ConfigStore over an LXC-style `key = value` configuration file.
// ABOUTME: Preserves comments, ordering and permissions on write; replaces files atomically.

use super::{ConfigStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A `key = value` file such as `/var/lib/lxc/<name>/corral.conf`.
///
/// Writes replace the file atomically, keeping its mode, owner and any
/// symlink pointing at it. Every read goes back to disk so edits made by the
/// lifecycle manager are picked up between resolutions.
#[derive(Debug, Clone)]
pub struct LxcConfigFile {
    path: PathBuf,
}

#[derive(Debug)]
enum Line {
    Verbatim(String),
    Entry { key: String, value: String },
}

impl LxcConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty file (and its parent directories) unless one exists.
    ///
    /// Returns true when a file was created.
    pub fn create_if_missing(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(io_err(e)),
        }
    }

    /// All `key = value` entries in file order.
    pub fn entries(&self) -> Result<Vec<(String, String)>, StoreError> {
        let lines = self.read_lines()?;
        Ok(lines
            .into_iter()
            .filter_map(|line| match line {
                Line::Entry { key, value } => Some((key, value)),
                Line::Verbatim(_) => None,
            })
            .collect())
    }

    fn read_lines(&self) -> Result<Vec<Line>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;
        parse(&content)
    }

    fn write_lines(&self, lines: &[Line]) -> Result<(), StoreError> {
        let mut out = String::new();
        for line in lines {
            match line {
                Line::Verbatim(text) => out.push_str(text),
                Line::Entry { key, value } => {
                    out.push_str(key);
                    out.push_str(" = ");
                    out.push_str(value);
                }
            }
            out.push('\n');
        }

        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        // Replace the symlink target, not the link itself.
        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(io_err(e)),
        };
        let original = match fs::metadata(&target) {
            Ok(meta) => Some(meta),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(io_err(e)),
        };

        let tmp = target.with_extension("corral-tmp");
        let replace = || -> std::io::Result<()> {
            fs::write(&tmp, &out)?;
            if let Some(meta) = &original {
                copy_ownership(meta, &tmp);
                fs::set_permissions(&tmp, meta.permissions())?;
            }
            fs::rename(&tmp, &target)
        };
        replace().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            io_err(e)
        })
    }
}

/// Give `tmp` the owner and group of the file it replaces.
///
/// Only root may hand a file to another user, so a refusal is logged and the
/// file keeps the writer's ownership.
#[cfg(unix)]
fn copy_ownership(original: &fs::Metadata, tmp: &Path) {
    use std::os::unix::fs::MetadataExt;

    let Ok(current) = fs::metadata(tmp) else {
        return;
    };
    if current.uid() == original.uid() && current.gid() == original.gid() {
        return;
    }
    if let Err(e) = std::os::unix::fs::chown(tmp, Some(original.uid()), Some(original.gid())) {
        tracing::warn!(path = %tmp.display(), error = %e, "could not preserve file ownership");
    }
}

#[cfg(not(unix))]
fn copy_ownership(_original: &fs::Metadata, _tmp: &Path) {}

fn parse(content: &str) -> Result<Vec<Line>, StoreError> {
    content
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return Ok(Line::Verbatim(raw.to_string()));
            }
            match trimmed.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => Ok(Line::Entry {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                _ => Err(StoreError::Malformed {
                    line: idx + 1,
                    content: raw.to_string(),
                }),
            }
        })
        .collect()
}

impl ConfigStore for LxcConfigFile {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let lines = self.read_lines()?;
        Ok(lines.into_iter().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value),
            _ => None,
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut lines = self.read_lines()?;

        let existing = lines
            .iter_mut()
            .find_map(|line| match line {
                Line::Entry { key: k, value: v } if k == key => Some(v),
                _ => None,
            });

        match existing {
            Some(slot) => *slot = value.to_string(),
            None => lines.push(Line::Entry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }

        self.write_lines(&lines)
    }
}
