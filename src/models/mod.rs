//! Domain models for the script bridge.
//!
//! # Core Concepts
//!
//! - [`ScriptRecord`]: a script sent by the authoring tool, consumed by export.
//! - [`ManifestEntry`]: a script discovered on disk, produced by a scan.
//! - [`ScriptKind`]: server, client or module; decides the filename suffix.
//!
//! Nothing here outlives a request. The project tree on disk is the only
//! persistent state.

mod report;
mod script;

pub use report::*;
pub use script::*;
