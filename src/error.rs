//! Error types for the script bridge.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while mapping, scanning, exporting or reading scripts.
///
/// Per-record export failures are collected into the export report; every
/// other variant short-circuits the single operation that raised it.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A path component failed the segment safety check.
    #[error("{field} {reason}")]
    InvalidSegment { field: String, reason: &'static str },

    /// The script kind is not one of the three recognised kinds.
    #[error("type must be Script, LocalScript, or ModuleScript")]
    InvalidKind { value: String },

    /// An export item does not have the expected shape.
    #[error("{0}")]
    InvalidRecord(String),

    /// The project selector does not name the configured project.
    #[error("unknown project '{0}'")]
    UnknownProject(String),

    /// The source root to scan does not exist.
    #[error("project source root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A requested file path is empty or absolute.
    #[error("invalid file path '{0}'")]
    InvalidPath(String),

    /// A requested or computed path resolves outside the source root.
    #[error("path escapes the project source root: {0}")]
    PathEscape(String),

    /// The requested file does not exist or is not a regular file.
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    pub(crate) fn invalid_segment(field: &str, reason: &'static str) -> Self {
        Self::InvalidSegment {
            field: field.to_string(),
            reason,
        }
    }
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
