//! Segment safety check shared by every path-building operation.

use crate::error::{BridgeError, Result};

/// Validate one path component and return it trimmed.
///
/// Every externally supplied segment (service, folder, script name, project
/// name) passes through here before it touches the filesystem. The returned
/// value is used verbatim as a single path component.
pub fn sanitize<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let segment = value.trim();
    if segment.is_empty() {
        return Err(BridgeError::invalid_segment(field, "cannot be empty"));
    }
    if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(BridgeError::invalid_segment(
            field,
            "contains invalid path characters",
        ));
    }
    Ok(segment)
}
