//! TOML-backed key→timestamp store.
//!
//! Persists nudge last-shown times and the last coarse-check time across
//! restarts. Stored at `<data_dir>/macroplan/timestamps.toml`; tests point
//! it at a temp path instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::data_dir;
use crate::error::StoreError;

const STORE_FILE: &str = "timestamps.toml";

/// A small persistent map from identity keys to timestamps.
///
/// Every `set` rewrites the file through a temp-file rename so a crash
/// mid-write cannot corrupt it.
#[derive(Debug)]
pub struct TimestampStore {
    path: PathBuf,
    entries: BTreeMap<String, DateTime<Utc>>,
}

impl TimestampStore {
    /// Open the store at the default platform location.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(data_dir()?.join(STORE_FILE))
    }

    /// Open (or create) the store at an explicit path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&raw).map_err(|e| StoreError::ParseFailed {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).copied()
    }

    /// All stored entries, for seeding the nudge queue on startup.
    pub fn all(&self) -> impl Iterator<Item = (&str, DateTime<Utc>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Record a timestamp and persist immediately.
    pub fn set(&mut self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), at);
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let body = toml::to_string(&self.entries).map_err(|e| StoreError::ParseFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("toml.tmp");
            fs::write(&tmp, &body)?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}
