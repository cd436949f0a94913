//! Error types for the preferences storage hooks.

use embedded_io::ErrorKind;
use fs_runtime::error_kind_to_str;
use std::fmt;

/// Coarse classification of a [`PrefsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No filesystem is mounted
    HandleUnavailable,
    /// The file could not be opened
    OpenFailed,
    /// A transfer or a filesystem call failed
    IoFailed,
    /// Stored content differs from the expected content
    Mismatch,
}

/// Errors that can occur in preferences storage operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsError {
    /// No filesystem is mounted
    HandleUnavailable,

    /// Opening the file failed
    OpenFailed { path: String, kind: ErrorKind },

    /// Read, write, seek or a filesystem call failed
    Io { path: String, kind: ErrorKind },

    /// Stored size differs from the expected length
    SizeMismatch {
        path: String,
        expected: usize,
        actual: u64,
    },

    /// Content is longer than the verification limit
    TooLarge {
        path: String,
        len: usize,
        limit: usize,
    },

    /// Same size, different bytes
    ContentMismatch { path: String },
}

impl PrefsError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::HandleUnavailable => FailureKind::HandleUnavailable,
            Self::OpenFailed { .. } => FailureKind::OpenFailed,
            Self::Io { .. } => FailureKind::IoFailed,
            Self::SizeMismatch { .. } | Self::TooLarge { .. } | Self::ContentMismatch { .. } => {
                FailureKind::Mismatch
            }
        }
    }

    /// The filesystem error behind this failure, if any
    #[must_use]
    pub fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::OpenFailed { kind, .. } | Self::Io { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub(crate) fn open(path: &str, kind: ErrorKind) -> Self {
        Self::OpenFailed {
            path: path.to_string(),
            kind,
        }
    }

    pub(crate) fn io(path: &str, kind: ErrorKind) -> Self {
        Self::Io {
            path: path.to_string(),
            kind,
        }
    }
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandleUnavailable => write!(f, "Filesystem is not mounted"),
            Self::OpenFailed { path, kind } => {
                write!(f, "Failed to open {path}: {}", error_kind_to_str(*kind))
            }
            Self::Io { path, kind } => {
                write!(f, "I/O error on {path}: {}", error_kind_to_str(*kind))
            }
            Self::SizeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "Size mismatch for {path}: expected {expected} bytes, found {actual}"
            ),
            Self::TooLarge { path, len, limit } => write!(
                f,
                "Content of {path} is {len} bytes, verification limit is {limit}"
            ),
            Self::ContentMismatch { path } => write!(f, "Content mismatch for {path}"),
        }
    }
}

impl std::error::Error for PrefsError {}
