use crate::error::PrefsError;

/// Storage hooks a preferences library calls to persist its entries.
///
/// Every entry is one file; namespaces are directories. Implementations open,
/// use and close a file within each call and keep no handle between calls.
pub trait PrefsStorage {
    /// Prepare the storage. The filesystem itself is brought up elsewhere.
    ///
    /// # Errors
    /// Implementation specific; [`crate::PrefsFs`] always succeeds.
    fn init(&self) -> Result<(), PrefsError>;

    /// Create a directory.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `Io` (including an already existing directory)
    fn mkdir(&self, path: &str) -> Result<(), PrefsError>;

    /// Check that the file at `path` holds exactly `expected`.
    ///
    /// # Errors
    /// - `SizeMismatch`, `TooLarge`, `ContentMismatch` when it does not
    /// - `HandleUnavailable`, `OpenFailed`, `Io`
    fn verify(&self, path: &str, expected: &[u8]) -> Result<(), PrefsError>;

    /// Create or truncate the file and write `data`. Returns bytes written.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `OpenFailed`, `Io`
    fn create(&self, path: &str, data: &[u8]) -> Result<usize, PrefsError>;

    /// Make the file hold exactly `data`, skipping the write when it already
    /// does. Returns `data.len()`.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `OpenFailed`, `Io`
    fn update(&self, path: &str, data: &[u8]) -> Result<usize, PrefsError>;

    /// Read the file into `buf`. Returns bytes read.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `OpenFailed`, `Io`
    fn read(&self, path: &str, buf: &mut [u8]) -> Result<usize, PrefsError>;

    /// Size of the file in bytes.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `OpenFailed`
    fn size(&self, path: &str) -> Result<u64, PrefsError>;

    /// # Errors
    /// - `HandleUnavailable`
    fn exists(&self, path: &str) -> Result<bool, PrefsError>;

    /// # Errors
    /// - `HandleUnavailable`, `Io`
    fn rename(&self, from: &str, to: &str) -> Result<(), PrefsError>;

    /// Delete one file.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `Io`
    fn unlink(&self, path: &str) -> Result<(), PrefsError>;

    /// Remove a directory, reporting what the filesystem reports.
    ///
    /// When `path` names a plain file, the file is removed.
    ///
    /// # Errors
    /// - `HandleUnavailable`, `Io`
    fn clean_dir(&self, path: &str) -> Result<(), PrefsError>;
}
