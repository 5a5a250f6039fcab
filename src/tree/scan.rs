//! Manifest generation by walking the project source tree.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{BridgeError, Result};
use crate::models::Manifest;

use super::identity_from_path;

/// Scan `source_root` and map every script file back to its identity.
///
/// Files without a script suffix are ignored. Script files that cannot be
/// mapped back (no service folder, unsafe names) are dropped and counted in
/// [`Manifest::skipped`]. Entries come out in traversal order.
pub fn scan(source_root: &Path) -> Result<Manifest> {
    if !source_root.is_dir() {
        return Err(BridgeError::RootNotFound {
            path: source_root.to_path_buf(),
        });
    }

    let mut manifest = Manifest::default();

    for entry in WalkDir::new(source_root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry during scan: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            continue;
        };

        match identity_from_path(relative) {
            Ok(Some(script)) => manifest.entries.push(script),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(path = %relative.display(), "Skipping script file: {}", e);
                manifest.skipped += 1;
            }
        }
    }

    if manifest.skipped > 0 {
        tracing::info!(
            "Manifest skipped {} script files that do not map to a valid identity",
            manifest.skipped
        );
    }

    Ok(manifest)
}
