//! Core error types for macroplan-core.
//!
//! The coordinator absorbs provider failures internally; these types only
//! cross the boundary for operations the caller explicitly awaits (store
//! access, plan file loading). Degenerate inputs to the redistribution
//! engine are not errors at all -- the engine falls back to pass-through.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for macroplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Data collaborator read failed
    #[error("Data provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Timestamp store access failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// A collaborator read failed or returned nothing usable.
///
/// Evaluation passes treat any of these as "no data this pass".
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// The underlying store could not serve the request.
    #[error("Data unavailable: {0}")]
    Unavailable(String),

    /// No profile has been set up yet.
    #[error("No profile available")]
    MissingProfile,
}

/// Timestamp-store specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read store at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("No data directory available on this platform")]
    NoDataDir,
}
