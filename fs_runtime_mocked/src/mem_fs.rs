/// In-memory filesystem for tests.
///
/// - `add_file` adds a file, creating missing parent directories.
/// - `get_file` gets the content of a file.
/// - `write_calls`, `open_count`, `live_handles` are probes on the traffic
///   the filesystem has seen.
/// - `WANT_ERROR` is a character that can be used to simulate an error.
///
/// `open`, `mkdir`, `rename`, `remove`:
/// - return `InvalidInput` if a path contains `WANT_ERROR`.
///
/// `write`:
/// - returns `Other` (EIO) if the data contains `WANT_ERROR`; nothing is written.
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use embedded_io::{ErrorKind, SeekFrom};
use fs_runtime::{parent_dir, DirEntry, FileHandle, FileSystem, OpenMode};
use parking_lot::Mutex;
use tracing::trace;

/// Test payloads must not contain this byte, or writes fail.
pub const WANT_ERROR: char = '\u{0001}';

const ROOT: &str = "/";

type FileData = Arc<Mutex<Vec<u8>>>;

#[derive(Debug, Default)]
struct Stats {
    opens: AtomicUsize,
    write_calls: AtomicUsize,
    live_handles: AtomicUsize,
}

#[derive(Debug)]
struct State {
    files: BTreeMap<String, FileData>,
    dirs: BTreeSet<String>,
}

impl State {
    fn new() -> Self {
        let mut dirs = BTreeSet::new();
        dirs.insert(ROOT.to_string());
        Self {
            files: BTreeMap::new(),
            dirs,
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn parent_is_dir(&self, path: &str) -> bool {
        parent_dir(path).is_some_and(|parent| self.dirs.contains(parent))
    }

    fn has_children(&self, dir: &str) -> bool {
        let prefix = child_prefix(dir);
        self.files.keys().any(|p| p.starts_with(&prefix))
            || self.dirs.iter().any(|p| p.starts_with(&prefix))
    }
}

#[derive(Debug)]
pub struct MemFs {
    state: Mutex<State>,
    stats: Arc<Stats>,
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn child_prefix(dir: &str) -> String {
    if dir == ROOT {
        ROOT.to_string()
    } else {
        format!("{dir}/")
    }
}

fn check_path(path: &str) -> Result<String, ErrorKind> {
    if path.contains(WANT_ERROR) {
        return Err(ErrorKind::InvalidInput);
    }
    Ok(normalize(path))
}

impl MemFs {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::new()),
            stats: Arc::new(Stats::default()),
        }
    }

    /// Drop all files and directories and reset the probes.
    pub fn clear(&self) {
        *self.state.lock() = State::new();
        self.reset_stats();
    }

    /// Reset the probes, leaving content alone.
    pub fn reset_stats(&self) {
        self.stats.opens.store(0, Ordering::Relaxed);
        self.stats.write_calls.store(0, Ordering::Relaxed);
    }

    /// Add a file, creating missing parent directories.
    pub fn add_file(&self, path: &str, content: Vec<u8>) {
        let path = normalize(path);
        let mut state = self.state.lock();
        let mut dir = parent_dir(&path);
        while let Some(d) = dir {
            state.dirs.insert(d.to_string());
            dir = parent_dir(d);
        }
        state.files.insert(path, Arc::new(Mutex::new(content)));
    }

    /// Content of a file, `None` if there is no such file.
    #[must_use]
    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let state = self.state.lock();
        state
            .files
            .get(&normalize(path))
            .map(|data| data.lock().clone())
    }

    #[must_use]
    pub fn is_dir(&self, path: &str) -> bool {
        self.state.lock().dirs.contains(&normalize(path))
    }

    /// Number of `write` calls on any handle since the last reset.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.stats.write_calls.load(Ordering::Relaxed)
    }

    /// Number of successful `open` calls since the last reset.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.stats.opens.load(Ordering::Relaxed)
    }

    /// Number of handles currently open.
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.stats.live_handles.load(Ordering::Relaxed)
    }

    fn new_handle(&self, data: FileData, mode: OpenMode) -> MemFile {
        self.stats.opens.fetch_add(1, Ordering::Relaxed);
        self.stats.live_handles.fetch_add(1, Ordering::Relaxed);
        MemFile {
            data,
            pos: 0,
            mode,
            stats: Arc::clone(&self.stats),
        }
    }
}

impl FileSystem for MemFs {
    type File = MemFile;

    fn open(&self, path: &str, mode: OpenMode) -> Result<MemFile, ErrorKind> {
        trace!(path = %path, mode = mode.as_str(), "open");
        let path = check_path(path)?;
        let mut state = self.state.lock();
        if state.dirs.contains(&path) {
            return Err(ErrorKind::InvalidInput);
        }

        let data = match mode {
            OpenMode::Read | OpenMode::ReadWrite => state
                .files
                .get(&path)
                .cloned()
                .ok_or(ErrorKind::NotFound)?,
            OpenMode::WriteTruncate => {
                let existing = state.files.get(&path).cloned();
                if let Some(data) = existing {
                    data.lock().clear();
                    data
                } else {
                    if !state.parent_is_dir(&path) {
                        return Err(ErrorKind::NotFound);
                    }
                    let data = Arc::new(Mutex::new(Vec::new()));
                    state.files.insert(path, Arc::clone(&data));
                    data
                }
            }
        };
        drop(state);

        Ok(self.new_handle(data, mode))
    }

    fn mkdir(&self, path: &str) -> Result<(), ErrorKind> {
        trace!(path = %path, "mkdir");
        let path = check_path(path)?;
        let mut state = self.state.lock();
        if state.exists(&path) {
            return Err(ErrorKind::AlreadyExists);
        }
        if !state.parent_is_dir(&path) {
            return Err(ErrorKind::NotFound);
        }
        state.dirs.insert(path);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.state.lock().exists(&normalize(path))
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), ErrorKind> {
        trace!(from = %from, to = %to, "rename");
        let from = check_path(from)?;
        let to = check_path(to)?;
        let mut state = self.state.lock();
        if from == ROOT || to == ROOT {
            return Err(ErrorKind::InvalidInput);
        }
        if !state.exists(&from) || !state.parent_is_dir(&to) {
            return Err(ErrorKind::NotFound);
        }
        if from == to {
            return Ok(());
        }
        if state.dirs.contains(&to) {
            return Err(ErrorKind::InvalidInput);
        }

        if let Some(data) = state.files.remove(&from) {
            state.files.insert(to, data);
            return Ok(());
        }

        if state.files.contains_key(&to) || to.starts_with(&child_prefix(&from)) {
            return Err(ErrorKind::InvalidInput);
        }
        let old_prefix = child_prefix(&from);
        let new_prefix = child_prefix(&to);
        let moved_files: Vec<String> = state
            .files
            .keys()
            .filter(|p| p.starts_with(&old_prefix))
            .cloned()
            .collect();
        for path in moved_files {
            if let Some(data) = state.files.remove(&path) {
                let renamed = format!("{new_prefix}{}", &path[old_prefix.len()..]);
                state.files.insert(renamed, data);
            }
        }
        let moved_dirs: Vec<String> = state
            .dirs
            .iter()
            .filter(|p| p.starts_with(&old_prefix))
            .cloned()
            .collect();
        for path in moved_dirs {
            state.dirs.remove(&path);
            state
                .dirs
                .insert(format!("{new_prefix}{}", &path[old_prefix.len()..]));
        }
        state.dirs.remove(&from);
        state.dirs.insert(to);
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<(), ErrorKind> {
        trace!(path = %path, "remove");
        let path = check_path(path)?;
        let mut state = self.state.lock();
        if state.files.remove(&path).is_some() {
            return Ok(());
        }
        if !state.dirs.contains(&path) {
            return Err(ErrorKind::NotFound);
        }
        if path == ROOT || state.has_children(&path) {
            return Err(ErrorKind::InvalidInput);
        }
        state.dirs.remove(&path);
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, ErrorKind> {
        trace!(path = %path, "list_dir");
        let path = normalize(path);
        let state = self.state.lock();
        if !state.dirs.contains(&path) {
            return Err(ErrorKind::NotFound);
        }
        let is_child = |p: &String| p != ROOT && parent_dir(p) == Some(path.as_str());
        let mut entries: Vec<DirEntry> = state
            .files
            .keys()
            .filter(|&p| is_child(p))
            .map(|p| DirEntry {
                path: p.clone(),
                is_dir: false,
            })
            .chain(state.dirs.iter().filter(|&p| is_child(p)).map(|p| DirEntry {
                path: p.clone(),
                is_dir: true,
            }))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Handle to a [`MemFs`] file
#[derive(Debug)]
pub struct MemFile {
    data: FileData,
    pos: usize,
    mode: OpenMode,
    stats: Arc<Stats>,
}

impl Drop for MemFile {
    fn drop(&mut self) {
        self.stats.live_handles.fetch_sub(1, Ordering::Relaxed);
    }
}

impl embedded_io::ErrorType for MemFile {
    type Error = ErrorKind;
}

impl embedded_io::Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        if self.mode == OpenMode::WriteTruncate {
            return Err(ErrorKind::PermissionDenied);
        }
        let data = self.data.lock();
        let start = self.pos.min(data.len());
        let to_copy = buf.len().min(data.len() - start);
        buf[..to_copy].copy_from_slice(&data[start..start + to_copy]);
        self.pos = start + to_copy;
        Ok(to_copy)
    }
}

impl embedded_io::Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.stats.write_calls.fetch_add(1, Ordering::Relaxed);
        if self.mode == OpenMode::Read {
            return Err(ErrorKind::PermissionDenied);
        }
        if buf.contains(&(WANT_ERROR as u8)) {
            return Err(ErrorKind::Other); // EIO
        }
        let mut data = self.data.lock();
        let end = self.pos + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}

impl embedded_io::Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        let len = self.data.lock().len() as u64;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => len.checked_add_signed(offset),
            SeekFrom::Current(offset) => (self.pos as u64).checked_add_signed(offset),
        };
        let target = target.ok_or(ErrorKind::InvalidInput)?;
        self.pos = usize::try_from(target).map_err(|_| ErrorKind::InvalidInput)?;
        Ok(target)
    }
}

impl FileHandle for MemFile {
    fn size(&self) -> u64 {
        self.data.lock().len() as u64
    }
}
