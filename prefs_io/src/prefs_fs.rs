//! Preferences storage backed by a mounted [`FileSystem`]

use std::sync::Arc;

use embedded_io::{ErrorKind, Seek, SeekFrom};
use fs_runtime::{error_kind_to_str, FileHandle, FileSystem, Mount, OpenMode};
use tracing::{debug, trace, warn};

use crate::error::PrefsError;
use crate::options::PrefsOptions;
use crate::storage::PrefsStorage;
use crate::verify::verify_content;

/// Preferences storage backed by a mounted [`FileSystem`]
///
/// Holds a clone of the [`Mount`] it was given and resolves it on every
/// call. While nothing is mounted, every operation except [`PrefsStorage::init`]
/// fails with [`PrefsError::HandleUnavailable`] before touching any file.
///
/// # Example
///
/// ```
/// use fs_runtime::{Mount, StdFs};
/// use prefs_io::{PrefsError, PrefsFs, PrefsStorage};
///
/// let mount: Mount<StdFs> = Mount::unmounted();
/// let prefs = PrefsFs::new(mount.clone());
/// assert_eq!(prefs.exists("/nvs"), Err(PrefsError::HandleUnavailable));
///
/// mount.mount(StdFs::new(std::env::temp_dir()));
/// assert!(prefs.exists("/").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PrefsFs<F> {
    mount: Mount<F>,
    options: PrefsOptions,
}

impl<F: FileSystem> PrefsFs<F> {
    #[must_use]
    pub fn new(mount: Mount<F>) -> Self {
        Self::with_options(mount, PrefsOptions::default())
    }

    #[must_use]
    pub fn with_options(mount: Mount<F>, options: PrefsOptions) -> Self {
        Self { mount, options }
    }

    #[must_use]
    pub fn options(&self) -> &PrefsOptions {
        &self.options
    }

    #[must_use]
    pub fn mount(&self) -> &Mount<F> {
        &self.mount
    }

    fn fs(&self) -> Result<Arc<F>, PrefsError> {
        self.mount.get().ok_or_else(|| {
            warn!("filesystem not mounted");
            PrefsError::HandleUnavailable
        })
    }

    fn open(fs: &F, path: &str, mode: OpenMode) -> Result<F::File, PrefsError> {
        fs.open(path, mode).map_err(|kind| PrefsError::open(path, kind))
    }

    fn create_with(fs: &F, path: &str, data: &[u8]) -> Result<usize, PrefsError> {
        let mut file = Self::open(fs, path, OpenMode::WriteTruncate)?;
        write_all(&mut file, path, data)
    }

    /// Remove children depth-first, then `path` itself.
    ///
    /// A path that cannot be listed as a directory (missing, or a plain file)
    /// goes straight to `remove`, so a file is deleted and a missing path
    /// reports `NotFound`. Any other listing failure is returned as is.
    fn remove_tree(fs: &F, path: &str) -> Result<(), PrefsError> {
        let entries = match fs.list_dir(path) {
            Ok(entries) => entries,
            Err(ErrorKind::NotFound) => Vec::new(),
            Err(kind) => return Err(PrefsError::io(path, kind)),
        };
        for entry in entries {
            debug!(path = %entry.path, is_dir = entry.is_dir, "clean_dir: removing");
            if entry.is_dir {
                Self::remove_tree(fs, &entry.path)?;
            } else {
                fs.remove(&entry.path)
                    .map_err(|kind| PrefsError::io(&entry.path, kind))?;
            }
        }
        fs.remove(path).map_err(|kind| PrefsError::io(path, kind))
    }
}

/// Write all of `data`, returning its length. A zero-length write is an error.
fn write_all<H: FileHandle>(file: &mut H, path: &str, data: &[u8]) -> Result<usize, PrefsError> {
    let mut written = 0;
    while written < data.len() {
        let n = file
            .write(&data[written..])
            .map_err(|kind| PrefsError::io(path, kind))?;
        if n == 0 {
            return Err(PrefsError::io(path, ErrorKind::Other));
        }
        written += n;
    }
    file.flush().map_err(|kind| PrefsError::io(path, kind))?;
    Ok(written)
}

/// Read until `buf` is full or the file ends.
fn read_fill<H: FileHandle>(file: &mut H, path: &str, buf: &mut [u8]) -> Result<usize, PrefsError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file
            .read(&mut buf[filled..])
            .map_err(|kind| PrefsError::io(path, kind))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

impl<F: FileSystem> PrefsStorage for PrefsFs<F> {
    fn init(&self) -> Result<(), PrefsError> {
        // Mounting is the startup routine's job
        Ok(())
    }

    fn mkdir(&self, path: &str) -> Result<(), PrefsError> {
        trace!(path = %path, "mkdir");
        let fs = self.fs()?;
        fs.mkdir(path).map_err(|kind| PrefsError::io(path, kind))
    }

    fn verify(&self, path: &str, expected: &[u8]) -> Result<(), PrefsError> {
        trace!(path = %path, len = expected.len(), "verify");
        let fs = self.fs()?;
        let mut file = Self::open(&fs, path, OpenMode::Read)?;
        verify_content(&mut file, path, expected, self.options.verify_limit)
    }

    fn create(&self, path: &str, data: &[u8]) -> Result<usize, PrefsError> {
        trace!(path = %path, len = data.len(), "create");
        let fs = self.fs()?;
        Self::create_with(&fs, path, data)
    }

    fn update(&self, path: &str, data: &[u8]) -> Result<usize, PrefsError> {
        trace!(path = %path, len = data.len(), "update");
        let fs = self.fs()?;
        match fs.open(path, OpenMode::ReadWrite) {
            Ok(mut file) => {
                if verify_content(&mut file, path, data, self.options.verify_limit).is_ok() {
                    debug!(path = %path, "update: content unchanged, skipping write");
                    return Ok(data.len());
                }
                if file.size() <= data.len() as u64 {
                    file.seek(SeekFrom::Start(0))
                        .map_err(|kind| PrefsError::io(path, kind))?;
                    return write_all(&mut file, path, data);
                }
                // Shrinking needs a truncate, which "r+" cannot do
                debug!(path = %path, old = file.size(), new = data.len(), "update: rewriting shorter content");
            }
            Err(kind) => {
                debug!(path = %path, error = error_kind_to_str(kind), "update: cannot open, creating");
            }
        }
        Self::create_with(&fs, path, data)
    }

    fn read(&self, path: &str, buf: &mut [u8]) -> Result<usize, PrefsError> {
        trace!(path = %path, len = buf.len(), "read");
        let fs = self.fs()?;
        let mut file = Self::open(&fs, path, OpenMode::Read)?;
        read_fill(&mut file, path, buf)
    }

    fn size(&self, path: &str) -> Result<u64, PrefsError> {
        trace!(path = %path, "size");
        let fs = self.fs()?;
        let file = Self::open(&fs, path, OpenMode::Read)?;
        Ok(file.size())
    }

    fn exists(&self, path: &str) -> Result<bool, PrefsError> {
        trace!(path = %path, "exists");
        let fs = self.fs()?;
        Ok(fs.exists(path))
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), PrefsError> {
        trace!(from = %from, to = %to, "rename");
        let fs = self.fs()?;
        fs.rename(from, to).map_err(|kind| PrefsError::io(from, kind))
    }

    fn unlink(&self, path: &str) -> Result<(), PrefsError> {
        trace!(path = %path, "unlink");
        let fs = self.fs()?;
        fs.remove(path).map_err(|kind| PrefsError::io(path, kind))
    }

    fn clean_dir(&self, path: &str) -> Result<(), PrefsError> {
        trace!(path = %path, recursive = self.options.recursive_clean, "clean_dir");
        let fs = self.fs()?;
        if self.options.recursive_clean {
            Self::remove_tree(&fs, path)
        } else {
            fs.remove(path).map_err(|kind| PrefsError::io(path, kind))
        }
    }
}
