//! Filesystem capability consumed by the preferences adapter.
//!
//! The traits here describe the small surface a flash filesystem exposes
//! (open/read/write/seek/mkdir/exists/rename/remove). [`Mount`] is the slot
//! through which a startup routine hands the mounted filesystem to its users.

mod error_mapping;
pub mod file_system;
pub mod mount;
pub mod std_fs;

pub use error_mapping::{errno_to_error_kind, error_kind_to_str, io_error_kind};
pub use file_system::{parent_dir, DirEntry, FileHandle, FileSystem, OpenMode};
pub use mount::Mount;
pub use std_fs::{StdFile, StdFs};
