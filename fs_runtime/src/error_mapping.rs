//! Error mapping utilities for converting between error types.
//!
//! This module provides functions to convert errno values and `std::io` errors
//! to `embedded_io::ErrorKind`, and to convert error kinds to human-readable
//! static strings.

use core::ffi::c_int;

/// Convert errno to `embedded_io::ErrorKind`
#[must_use]
#[allow(clippy::match_same_arms)] // We explicitly list common errno values for documentation
pub fn errno_to_error_kind(errno: c_int) -> embedded_io::ErrorKind {
    match errno {
        1 | 13 => embedded_io::ErrorKind::PermissionDenied, // EPERM, EACCES
        2 | 20 => embedded_io::ErrorKind::NotFound,         // ENOENT, ENOTDIR
        9 | 22 | 21 | 39 => embedded_io::ErrorKind::InvalidInput, // EBADF, EINVAL, EISDIR, ENOTEMPTY
        12 | 28 => embedded_io::ErrorKind::OutOfMemory,     // ENOMEM, ENOSPC (no space left)
        17 => embedded_io::ErrorKind::AlreadyExists,        // EEXIST
        24 => embedded_io::ErrorKind::Unsupported,          // EMFILE (too many open files)
        // EIO, EAGAIN/EWOULDBLOCK
        5 | 11 => embedded_io::ErrorKind::Other,
        _ => embedded_io::ErrorKind::Other,
    }
}

/// Convert a `std::io::Error` to `embedded_io::ErrorKind`
///
/// The portable `std::io::ErrorKind` decides first, so the host backend
/// reports the same kinds a flash filesystem would on every platform. Errors
/// std leaves uncategorized fall back to the errno table on Linux.
#[must_use]
pub fn io_error_kind(error: &std::io::Error) -> embedded_io::ErrorKind {
    match error.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
            embedded_io::ErrorKind::NotFound
        }
        std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
        std::io::ErrorKind::AlreadyExists => embedded_io::ErrorKind::AlreadyExists,
        std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::DirectoryNotEmpty
        | std::io::ErrorKind::IsADirectory => embedded_io::ErrorKind::InvalidInput,
        std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
        std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
        std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
        std::io::ErrorKind::OutOfMemory | std::io::ErrorKind::StorageFull => {
            embedded_io::ErrorKind::OutOfMemory
        }
        _ => raw_os_error_kind(error),
    }
}

#[cfg(target_os = "linux")]
fn raw_os_error_kind(error: &std::io::Error) -> embedded_io::ErrorKind {
    error
        .raw_os_error()
        .map_or(embedded_io::ErrorKind::Other, errno_to_error_kind)
}

#[cfg(not(target_os = "linux"))]
fn raw_os_error_kind(_error: &std::io::Error) -> embedded_io::ErrorKind {
    embedded_io::ErrorKind::Other
}

/// Convert error kind to a static string description
#[must_use]
pub fn error_kind_to_str(kind: embedded_io::ErrorKind) -> &'static str {
    match kind {
        embedded_io::ErrorKind::NotFound => "not found",
        embedded_io::ErrorKind::PermissionDenied => "permission denied",
        embedded_io::ErrorKind::AlreadyExists => "already exists",
        embedded_io::ErrorKind::InvalidInput => "invalid input",
        embedded_io::ErrorKind::InvalidData => "invalid data",
        embedded_io::ErrorKind::TimedOut => "timed out",
        embedded_io::ErrorKind::Interrupted => "interrupted",
        embedded_io::ErrorKind::Unsupported => "unsupported",
        embedded_io::ErrorKind::OutOfMemory => "out of memory",
        embedded_io::ErrorKind::Other => "other error",
        _ => "unknown error",
    }
}
