//! Mapping between a script's logical identity and its file in the tree.
//!
//! The forward direction trusts nothing about the record beyond what the
//! sanitizer accepts. The inverse direction is defensive: it runs over
//! whatever happens to be on disk, so anything that does not fit the naming
//! convention is reported back to the scanner instead of being trusted.

use std::path::{Component, Path, PathBuf};

use crate::error::{BridgeError, Result};
use crate::models::{ManifestEntry, ScriptKind, ScriptRecord};

use super::sanitize;

/// Filename suffix for each script kind, longest suffix first.
///
/// Inference walks the table in order, so `.luau` must stay last.
pub const KIND_SUFFIXES: [(&str, ScriptKind); 3] = [
    (".server.luau", ScriptKind::Server),
    (".client.luau", ScriptKind::Client),
    (".luau", ScriptKind::Module),
];

/// Filename suffix used on disk for `kind`.
pub fn suffix_for(kind: ScriptKind) -> &'static str {
    KIND_SUFFIXES
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(suffix, _)| *suffix)
        .unwrap_or(".luau")
}

/// Split a filename into script name and kind, if it carries a known suffix.
pub fn split_file_name(file_name: &str) -> Option<(&str, ScriptKind)> {
    KIND_SUFFIXES.iter().find_map(|(suffix, kind)| {
        file_name
            .strip_suffix(suffix)
            .map(|name| (name, *kind))
    })
}

/// Compute `<name><suffix>` for a script, sanitizing the name.
///
/// The resulting filename must split back into the same name and kind, so a
/// module called `Foo.server` is refused instead of landing on `Foo`'s
/// server script.
pub fn file_name(name: &str, kind: ScriptKind) -> Result<String> {
    let name = sanitize(name, "name")?;
    let file_name = format!("{name}{}", suffix_for(kind));
    if split_file_name(&file_name) != Some((name, kind)) {
        return Err(BridgeError::invalid_segment(
            "name",
            "is ambiguous with a script suffix",
        ));
    }
    Ok(file_name)
}

/// Where a record lands on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTarget {
    /// Directory holding the file; may not exist yet.
    pub dir: PathBuf,
    pub file: PathBuf,
}

/// Map a record to `<source_root>/<service>/<path...>/<file name>`.
pub fn target_path(source_root: &Path, record: &ScriptRecord) -> Result<ScriptTarget> {
    let mut dir = source_root.join(sanitize(&record.container, "service")?);
    for part in &record.folder_path {
        dir.push(sanitize(part, "path[]")?);
    }

    let file = dir.join(file_name(&record.name, record.kind)?);
    Ok(ScriptTarget { dir, file })
}

/// Recover a script identity from a path relative to the source root.
///
/// Returns `Ok(None)` for files that are not scripts at all, and an error for
/// files that look like scripts but cannot be mapped back to a valid identity.
pub fn identity_from_path(relative: &Path) -> Result<Option<ManifestEntry>> {
    let display = relative.display().to_string();

    // Non-scripts are ignored before anything else, undecodable names included.
    let Some(file) = relative.file_name() else {
        return Ok(None);
    };
    if split_file_name(&file.to_string_lossy()).is_none() {
        return Ok(None);
    }

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => segments.push(part),
                None => {
                    return Err(BridgeError::invalid_segment(
                        "path[]",
                        "is not valid UTF-8",
                    ))
                }
            },
            _ => return Err(BridgeError::InvalidPath(display)),
        }
    }

    let Some((file, dirs)) = segments.split_last() else {
        return Ok(None);
    };
    let Some((name, kind)) = split_file_name(file) else {
        return Ok(None);
    };
    let Some((container, folders)) = dirs.split_first() else {
        return Err(BridgeError::InvalidPath(display));
    };

    let container = sanitize(container, "service")?.to_string();
    let folder_path = folders
        .iter()
        .map(|part| sanitize(part, "path[]").map(str::to_string))
        .collect::<Result<Vec<_>>>()?;
    let name = sanitize(name, "name")?.to_string();

    Ok(Some(ManifestEntry {
        container,
        folder_path,
        name,
        kind,
        relative_file: segments.join("/"),
    }))
}

/// Lexically resolve `relative` without touching the filesystem.
///
/// Returns `None` when the path is absolute or climbs above its starting
/// point.
pub fn normalize_relative(relative: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(normalized)
}
