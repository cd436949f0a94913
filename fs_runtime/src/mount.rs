//! Shared slot holding the mounted filesystem

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Shared slot holding the mounted filesystem
///
/// The startup routine that brings the filesystem up calls [`Mount::mount`];
/// everything that needs the filesystem receives a clone of the slot and
/// resolves it per operation with [`Mount::get`]. Clones share the same slot.
///
/// # Example
///
/// ```
/// use fs_runtime::{Mount, StdFs};
///
/// let mount: Mount<StdFs> = Mount::unmounted();
/// let shared = mount.clone();
/// assert!(shared.get().is_none());
///
/// mount.mount(StdFs::new(std::env::temp_dir()));
/// assert!(shared.get().is_some());
/// ```
pub struct Mount<F>(Arc<RwLock<Option<Arc<F>>>>);

impl<F> Mount<F> {
    /// Create an empty slot
    #[must_use]
    pub fn unmounted() -> Self {
        Self(Arc::new(RwLock::new(None)))
    }

    /// Create a slot that already holds `fs`
    #[must_use]
    pub fn mounted(fs: F) -> Self {
        Self(Arc::new(RwLock::new(Some(Arc::new(fs)))))
    }

    /// Place `fs` into the slot, replacing any previous filesystem
    pub fn mount(&self, fs: F) {
        debug!("filesystem mounted");
        *self.0.write() = Some(Arc::new(fs));
    }

    /// Empty the slot, returning the filesystem that was mounted
    pub fn unmount(&self) -> Option<Arc<F>> {
        debug!("filesystem unmounted");
        self.0.write().take()
    }

    /// The mounted filesystem, if any
    #[must_use]
    pub fn get(&self) -> Option<Arc<F>> {
        self.0.read().clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.read().is_some()
    }
}

impl<F> Clone for Mount<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F> Default for Mount<F> {
    fn default() -> Self {
        Self::unmounted()
    }
}

impl<F> std::fmt::Debug for Mount<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
