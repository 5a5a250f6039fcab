//! Reading a single script by the handle the manifest hands out.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{BridgeError, Result};

use super::normalize_relative;

/// Read the text of `relative` below `source_root`.
///
/// The handle is re-validated rather than trusted: it must be non-empty and
/// relative, must stay below the root after `..` is resolved, and must not
/// reach outside the root through a symlink either.
pub fn read_file(source_root: &Path, relative: &str) -> Result<String> {
    if relative.is_empty() || relative.starts_with(['/', '\\']) {
        return Err(BridgeError::InvalidPath(relative.to_string()));
    }

    let normalized = normalize_relative(Path::new(relative))
        .ok_or_else(|| BridgeError::PathEscape(relative.to_string()))?;
    if normalized.as_os_str().is_empty() {
        return Err(BridgeError::InvalidPath(relative.to_string()));
    }

    let root = source_root
        .canonicalize()
        .map_err(|_| BridgeError::NotFound(relative.to_string()))?;
    let resolved = match root.join(&normalized).canonicalize() {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(BridgeError::NotFound(relative.to_string()))
        }
        Err(source) => {
            return Err(BridgeError::ReadError {
                path: root.join(&normalized),
                source,
            })
        }
    };
    if !resolved.starts_with(&root) {
        return Err(BridgeError::PathEscape(relative.to_string()));
    }
    if !resolved.is_file() {
        return Err(BridgeError::NotFound(relative.to_string()));
    }

    fs::read_to_string(&resolved).map_err(|source| match source.kind() {
        ErrorKind::NotFound => BridgeError::NotFound(relative.to_string()),
        _ => BridgeError::ReadError {
            path: resolved.clone(),
            source,
        },
    })
}
