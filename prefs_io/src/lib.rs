//! Storage hooks for a key/value preferences library, performed through an
//! application-owned filesystem.
//!
//! # Example
//!
//! ```
//! use fs_runtime::{Mount, StdFs};
//! use prefs_io::{PrefsFs, PrefsStorage};
//!
//! let dir = std::env::temp_dir().join("prefs_io_doc");
//! std::fs::create_dir_all(&dir).unwrap();
//!
//! let prefs = PrefsFs::new(Mount::mounted(StdFs::new(&dir)));
//! prefs.update("/greeting", b"hello").unwrap();
//! assert!(prefs.verify("/greeting", b"hello").is_ok());
//!
//! let mut buf = [0u8; 5];
//! assert_eq!(prefs.read("/greeting", &mut buf).unwrap(), 5);
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```

pub mod compat;
mod error;
mod options;
mod prefs_fs;
mod storage;
mod verify;

pub use error::{FailureKind, PrefsError};
pub use options::{PrefsOptions, DEFAULT_VERIFY_LIMIT};
pub use prefs_fs::PrefsFs;
pub use storage::PrefsStorage;
pub use verify::VERIFY_CHUNK;
