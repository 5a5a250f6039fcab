//! Mapping between script identities and the on-disk project tree.
//!
//! Layout: `<source root>/<service>/<folders...>/<name><suffix>`, where the
//! suffix encodes the script kind (see [`KIND_SUFFIXES`]).
//!
//! Every function here takes the source root explicitly and holds no state
//! between calls, so concurrent requests only share the filesystem itself.

mod export;
mod mapping;
mod read;
mod sanitize;
mod scan;

pub use export::{export_all, write_script};
pub use mapping::{
    file_name, identity_from_path, normalize_relative, split_file_name, suffix_for,
    target_path, ScriptTarget, KIND_SUFFIXES,
};
pub use read::read_file;
pub use sanitize::sanitize;
pub use scan::scan;
