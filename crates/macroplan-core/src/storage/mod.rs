//! Persistent state for the core.
//!
//! The core owns very little storage: one small key→timestamp map used for
//! nudge cooldowns and the coarse-check marker. Everything else (windows,
//! entries, profile) lives behind the external [`DataProvider`] boundary.
//!
//! [`DataProvider`]: crate::provider::DataProvider

pub mod timestamps;

pub use timestamps::TimestampStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Platform data directory for macroplan (`~/.local/share/macroplan` on
/// Linux, the platform equivalent elsewhere).
pub fn data_dir() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .map(|p| p.join("macroplan"))
        .ok_or(StoreError::NoDataDir)
}
