//! Error types for snipstash operations.
//!
//! This module defines [`SnipError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SnipError` for failures that need distinct handling (store I/O,
//!   malformed persisted data)
//! - Unknown-id lookups in the repository are signaled by `bool`/`Option`
//!   returns, not errors; `SnippetNotFound`/`NoMatch` exist for the CLI
//!   boundary, where "nothing found" has to become an exit code
//! - Use `anyhow::Error` (via `SnipError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for snipstash operations.
#[derive(Debug, Error)]
pub enum SnipError {
    /// Persisted snippet data exists but is not the expected shape.
    #[error("Malformed snippet data at {path}: {message}")]
    MalformedData { path: PathBuf, message: String },

    /// Referenced snippet does not exist.
    #[error("Unknown snippet: {id}")]
    SnippetNotFound { id: String },

    /// A search produced no candidates for a trigger.
    #[error("No snippet matches '{query}'")]
    NoMatch { query: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while reading or writing the store.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for snipstash operations.
pub type Result<T> = std::result::Result<T, SnipError>;
