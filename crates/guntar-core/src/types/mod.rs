//! Type-safe wrappers for paths and entry kinds.
//!
//! Archive paths and extraction destinations are validated upon construction
//! and cannot be created from raw strings without going through
//! normalization, so a confined path is a property of the type.

pub mod dest_dir;
pub mod entry_kind;
pub mod entry_path;

pub use dest_dir::DestDir;
pub use entry_kind::EntryKind;
pub use entry_path::EntryPath;
pub use entry_path::ROOT_PATH;
