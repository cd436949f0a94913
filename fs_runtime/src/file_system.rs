use embedded_io::ErrorKind;

/// Mode for opening a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read existing file, error if not found (`"r"`)
    Read,
    /// Create new file or truncate an existing one (`"w"`)
    WriteTruncate,
    /// Read and write an existing file without truncating, error if not found (`"r+"`)
    ReadWrite,
}

impl OpenMode {
    /// The C `fopen`-style mode string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::WriteTruncate => "w",
            Self::ReadWrite => "r+",
        }
    }
}

/// One entry returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry
    pub path: String,
    pub is_dir: bool,
}

/// An open file.
///
/// The handle is closed when dropped, so it never outlives the operation
/// that opened it.
pub trait FileHandle:
    embedded_io::ErrorType<Error = ErrorKind> + embedded_io::Read + embedded_io::Write + embedded_io::Seek
{
    /// Current size of the file in bytes.
    fn size(&self) -> u64;
}

/// Trait for filesystem backends.
/// Provides the subset of operations a flash filesystem such as LittleFS offers.
/// Paths are absolute, `/`-separated strings (`/nvs/namespace/key`).
pub trait FileSystem: Send + Sync {
    type File: FileHandle;

    /// Open a file at path with given mode.
    ///
    /// # Errors
    /// - `NotFound` if the file (or, for `WriteTruncate`, its parent) is missing
    /// - `InvalidInput` if the path names a directory
    fn open(&self, path: &str, mode: OpenMode) -> Result<Self::File, ErrorKind>;

    /// Create a single directory level.
    ///
    /// # Errors
    /// - `AlreadyExists` if the path exists
    /// - `NotFound` if the parent directory is missing
    fn mkdir(&self, path: &str) -> Result<(), ErrorKind>;

    /// Check whether a file or directory exists at path.
    fn exists(&self, path: &str) -> bool;

    /// Rename a file or directory, replacing an existing destination file.
    ///
    /// # Errors
    /// - `NotFound` if the source or the destination parent is missing
    fn rename(&self, from: &str, to: &str) -> Result<(), ErrorKind>;

    /// Remove a file or an empty directory.
    ///
    /// # Errors
    /// - `NotFound` if nothing exists at path
    /// - `InvalidInput` if the directory is not empty
    fn remove(&self, path: &str) -> Result<(), ErrorKind>;

    /// List the direct children of a directory, sorted by path.
    ///
    /// # Errors
    /// - `NotFound` if the directory is missing or `path` is not a directory
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, ErrorKind>;
}

/// Parent directory of a `/`-separated path, `None` for the root.
///
/// ```
/// use fs_runtime::parent_dir;
///
/// assert_eq!(parent_dir("/nvs/ns/key"), Some("/nvs/ns"));
/// assert_eq!(parent_dir("/nvs"), Some("/"));
/// assert_eq!(parent_dir("/"), None);
/// ```
#[must_use]
pub fn parent_dir(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&trimmed[..idx]),
        None => Some("/"),
    }
}
