//! Writing exported scripts into the project tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result};
use crate::models::{ExportReport, ScriptRecord};

use super::target_path;

/// Write one record to its place in the tree, creating missing folders.
///
/// The file is created or overwritten with the record's source, byte for
/// byte. Returns the path that was written.
pub fn write_script(source_root: &Path, record: &ScriptRecord) -> Result<PathBuf> {
    let target = target_path(source_root, record)?;

    fs::create_dir_all(source_root).map_err(|source| BridgeError::WriteError {
        path: source_root.to_path_buf(),
        source,
    })?;

    // Sanitized segments cannot climb out, but a symlinked folder inside the
    // tree still can. Check the deepest folder that already exists before
    // creating anything below it.
    let root = canonical(source_root)?;
    let existing = target
        .dir
        .ancestors()
        .find(|dir| dir.exists())
        .unwrap_or(source_root);
    let escapes = !canonical(existing)?.starts_with(&root)
        || (target.file.exists() && !canonical(&target.file)?.starts_with(&root));
    if escapes {
        return Err(BridgeError::PathEscape(target.file.display().to_string()));
    }

    fs::create_dir_all(&target.dir).map_err(|source| BridgeError::WriteError {
        path: target.dir.clone(),
        source,
    })?;
    fs::write(&target.file, record.source.as_bytes()).map_err(|source| {
        BridgeError::WriteError {
            path: target.file.clone(),
            source,
        }
    })?;

    Ok(target.file)
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|source| BridgeError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Export a batch of items, each already parsed into a record or an error.
///
/// Items are independent: a failure is recorded against the item's index and
/// the batch carries on.
pub fn export_all<I>(source_root: &Path, items: I) -> ExportReport
where
    I: IntoIterator<Item = Result<ScriptRecord>>,
{
    let mut report = ExportReport::default();

    for (index, item) in items.into_iter().enumerate() {
        match item.and_then(|record| write_script(source_root, &record)) {
            Ok(path) => {
                tracing::debug!("Wrote {}", path.display());
                report.record_written();
            }
            Err(e) => {
                if matches!(e, BridgeError::WriteError { .. }) {
                    tracing::warn!("Export of scripts[{}] failed: {}", index, e);
                }
                report.record_skipped(index, e);
            }
        }
    }

    report
}
