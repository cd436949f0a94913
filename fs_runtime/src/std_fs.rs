//! Host-directory implementation of [`FileSystem`]
//!
//! Maps absolute preference paths below a root directory, so `/nvs/ns/key`
//! becomes `<root>/nvs/ns/key`.

use std::fs::{File, OpenOptions};
use std::io::{Read as _, Seek as _, Write as _};
use std::path::{Component, Path, PathBuf};

use embedded_io::{ErrorKind, SeekFrom};
use tracing::trace;

use crate::error_mapping::io_error_kind;
use crate::file_system::{DirEntry, FileHandle, FileSystem, OpenMode};

/// Filesystem rooted at a host directory
#[derive(Debug, Clone)]
pub struct StdFs {
    root: PathBuf,
}

impl StdFs {
    /// Create a filesystem whose `/` is `root`. The directory is not created.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ErrorKind> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ErrorKind::InvalidInput);
        }
        Ok(self.root.join(relative))
    }
}

fn join_path(dir: &str, name: &str) -> String {
    format!("{}/{name}", dir.trim_end_matches('/'))
}

impl FileSystem for StdFs {
    type File = StdFile;

    fn open(&self, path: &str, mode: OpenMode) -> Result<StdFile, ErrorKind> {
        trace!(path = %path, mode = mode.as_str(), "open");
        let abs = self.resolve(path)?;
        if abs.is_dir() {
            return Err(ErrorKind::InvalidInput);
        }
        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::WriteTruncate => options.write(true).create(true).truncate(true),
            OpenMode::ReadWrite => options.read(true).write(true),
        };
        let file = options.open(&abs).map_err(|e| io_error_kind(&e))?;
        Ok(StdFile { file })
    }

    fn mkdir(&self, path: &str) -> Result<(), ErrorKind> {
        trace!(path = %path, "mkdir");
        let abs = self.resolve(path)?;
        std::fs::create_dir(abs).map_err(|e| io_error_kind(&e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|abs| abs.exists())
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), ErrorKind> {
        trace!(from = %from, to = %to, "rename");
        let abs_from = self.resolve(from)?;
        let abs_to = self.resolve(to)?;
        std::fs::rename(abs_from, abs_to).map_err(|e| io_error_kind(&e))
    }

    fn remove(&self, path: &str) -> Result<(), ErrorKind> {
        trace!(path = %path, "remove");
        let abs = self.resolve(path)?;
        let result = if abs.is_dir() {
            std::fs::remove_dir(abs)
        } else {
            std::fs::remove_file(abs)
        };
        result.map_err(|e| io_error_kind(&e))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, ErrorKind> {
        trace!(path = %path, "list_dir");
        let abs = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(abs).map_err(|e| io_error_kind(&e))? {
            let entry = entry.map_err(|e| io_error_kind(&e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| io_error_kind(&e))?
                .is_dir();
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(DirEntry {
                path: join_path(path, &name),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Open host file; closed on drop
#[derive(Debug)]
pub struct StdFile {
    file: File,
}

impl embedded_io::ErrorType for StdFile {
    type Error = ErrorKind;
}

impl embedded_io::Read for StdFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        self.file.read(buf).map_err(|e| io_error_kind(&e))
    }
}

impl embedded_io::Write for StdFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.file.write(buf).map_err(|e| io_error_kind(&e))
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.file.flush().map_err(|e| io_error_kind(&e))
    }
}

impl embedded_io::Seek for StdFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        let pos = match pos {
            SeekFrom::Start(offset) => std::io::SeekFrom::Start(offset),
            SeekFrom::End(offset) => std::io::SeekFrom::End(offset),
            SeekFrom::Current(offset) => std::io::SeekFrom::Current(offset),
        };
        self.file.seek(pos).map_err(|e| io_error_kind(&e))
    }
}

impl FileHandle for StdFile {
    fn size(&self) -> u64 {
        self.file.metadata().map_or(0, |m| m.len())
    }
}
