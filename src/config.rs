//! Bridge configuration: where the project lives and what it is called.

use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result};
use crate::tree::sanitize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 34873;
pub const DEFAULT_PROJECT: &str = "MyGame";

/// Directory below the project root that holds the script tree.
const SOURCE_DIR: &str = "src";

/// The single project this bridge serves.
///
/// Passed explicitly into every operation so the core can run against any
/// directory, including throwaway ones in tests.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    base_dir: PathBuf,
    project_name: String,
}

impl BridgeConfig {
    /// Create a config for `project_name` under `base_dir`.
    ///
    /// The project name becomes a path component, so it goes through the
    /// same segment check as everything else.
    pub fn new(base_dir: impl Into<PathBuf>, project_name: &str) -> Result<Self> {
        let project_name = sanitize(project_name, "project")?.to_string();
        Ok(Self {
            base_dir: base_dir.into(),
            project_name,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// `<base_dir>/<project>`
    pub fn project_root(&self) -> PathBuf {
        self.base_dir.join(&self.project_name)
    }

    /// `<base_dir>/<project>/src`, the root every script path is relative to.
    pub fn source_root(&self) -> PathBuf {
        self.project_root().join(SOURCE_DIR)
    }

    /// Check a caller's project selector against the configured project.
    pub fn check_project(&self, selector: &str) -> Result<()> {
        if selector == self.project_name {
            Ok(())
        } else {
            Err(BridgeError::UnknownProject(selector.to_string()))
        }
    }
}
