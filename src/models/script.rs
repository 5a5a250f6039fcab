use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// The three script classes Studio distinguishes.
///
/// On the wire a kind is spelled with its Studio class name; on disk it is
/// encoded in the file suffix (see [`crate::tree::KIND_SUFFIXES`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScriptKind {
    #[serde(rename = "Script")]
    Server,
    #[serde(rename = "LocalScript")]
    Client,
    #[serde(rename = "ModuleScript")]
    Module,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::Server => "Script",
            ScriptKind::Client => "LocalScript",
            ScriptKind::Module => "ModuleScript",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Script" => Ok(ScriptKind::Server),
            "LocalScript" => Ok(ScriptKind::Client),
            "ModuleScript" => Ok(ScriptKind::Module),
            _ => Err(BridgeError::InvalidKind {
                value: s.to_string(),
            }),
        }
    }
}

/// One script sent by the authoring tool for export.
///
/// Segments are kept exactly as received; they are sanitized when the record
/// is mapped to a path, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    pub container: String,
    pub folder_path: Vec<String>,
    pub name: String,
    pub kind: ScriptKind,
    pub source: String,
}

impl ScriptRecord {
    /// Build a record from one item of an export request.
    ///
    /// Items arrive as loosely typed JSON so that a single malformed item can
    /// be reported on its own instead of failing the whole request.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| BridgeError::InvalidRecord("item must be an object".to_string()))?;

        let container = string_field(object.get("service"), "service")?;
        let name = string_field(object.get("name"), "name")?;

        let kind = match object.get("type") {
            Some(Value::String(kind)) => kind.parse()?,
            other => {
                return Err(BridgeError::InvalidKind {
                    value: other.map(Value::to_string).unwrap_or_default(),
                })
            }
        };

        let source = match object.get("source") {
            Some(Value::String(source)) => source.clone(),
            _ => {
                return Err(BridgeError::InvalidRecord(
                    "source must be a string".to_string(),
                ))
            }
        };

        let folder_path = match object.get("path") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(parts)) => parts
                .iter()
                .map(|part| string_field(Some(part), "path[]"))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(BridgeError::InvalidRecord(
                    "path must be an array".to_string(),
                ))
            }
        };

        Ok(Self {
            container,
            folder_path,
            name,
            kind,
            source,
        })
    }
}

fn string_field(value: Option<&Value>, field: &str) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(BridgeError::invalid_segment(field, "must be a string")),
    }
}

/// A script discovered in the project tree.
///
/// Entries are only ever produced by scanning; `file` is the
/// forward-slash-joined path below the source root and doubles as the handle
/// for a later file read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "service")]
    pub container: String,
    #[serde(rename = "path")]
    pub folder_path: Vec<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScriptKind,
    #[serde(rename = "file")]
    pub relative_file: String,
}
