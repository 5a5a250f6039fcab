use serde::{Deserialize, Serialize};

/// Outcome of an export batch.
///
/// `errors` holds one message per skipped item, each prefixed with the
/// item's position in the request (`scripts[3]: ...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub exported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ExportReport {
    pub(crate) fn record_written(&mut self) {
        self.exported += 1;
    }

    pub(crate) fn record_skipped(&mut self, index: usize, reason: impl std::fmt::Display) {
        self.skipped += 1;
        self.errors.push(format!("scripts[{index}]: {reason}"));
    }
}

/// Scripts found by a tree scan, plus how many candidate files were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<super::ManifestEntry>,
    pub skipped: usize,
}
