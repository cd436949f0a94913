//! Return-code conventions of the C preferences hooks.
//!
//! Each function forwards to a [`PrefsStorage`] and folds the result into
//! `bool`, or into a byte count with `-1` for failure. The error detail is
//! logged and otherwise dropped; use the [`PrefsStorage`] methods directly to
//! keep it.

use core::ffi::c_int;

use tracing::debug;

use crate::error::PrefsError;
use crate::storage::PrefsStorage;

fn ok_or_false(op: &str, result: Result<(), PrefsError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            debug!(op = op, error = %e, "prefs hook failed");
            false
        }
    }
}

fn count_or_minus_one<N>(op: &str, result: Result<N, PrefsError>) -> c_int
where
    c_int: TryFrom<N>,
{
    match result {
        Ok(n) => c_int::try_from(n).unwrap_or(-1),
        Err(e) => {
            debug!(op = op, error = %e, "prefs hook failed");
            -1
        }
    }
}

#[must_use]
pub fn fs_init<S: PrefsStorage + ?Sized>(storage: &S) -> bool {
    ok_or_false("init", storage.init())
}

#[must_use]
pub fn fs_mkdir<S: PrefsStorage + ?Sized>(storage: &S, path: &str) -> bool {
    ok_or_false("mkdir", storage.mkdir(path))
}

#[must_use]
pub fn fs_verify<S: PrefsStorage + ?Sized>(storage: &S, path: &str, expected: &[u8]) -> bool {
    ok_or_false("verify", storage.verify(path, expected))
}

/// Bytes written, or -1.
#[must_use]
pub fn fs_create<S: PrefsStorage + ?Sized>(storage: &S, path: &str, data: &[u8]) -> c_int {
    count_or_minus_one("create", storage.create(path, data))
}

/// Bytes written (or already present), or -1.
#[must_use]
pub fn fs_update<S: PrefsStorage + ?Sized>(storage: &S, path: &str, data: &[u8]) -> c_int {
    count_or_minus_one("update", storage.update(path, data))
}

/// Bytes read, or -1.
#[must_use]
pub fn fs_read<S: PrefsStorage + ?Sized>(storage: &S, path: &str, buf: &mut [u8]) -> c_int {
    count_or_minus_one("read", storage.read(path, buf))
}

/// File size, or -1.
#[must_use]
pub fn fs_get_size<S: PrefsStorage + ?Sized>(storage: &S, path: &str) -> c_int {
    count_or_minus_one("get_size", storage.size(path))
}

#[must_use]
pub fn fs_exists<S: PrefsStorage + ?Sized>(storage: &S, path: &str) -> bool {
    match storage.exists(path) {
        Ok(found) => found,
        Err(e) => {
            debug!(op = "exists", error = %e, "prefs hook failed");
            false
        }
    }
}

#[must_use]
pub fn fs_rename<S: PrefsStorage + ?Sized>(storage: &S, from: &str, to: &str) -> bool {
    ok_or_false("rename", storage.rename(from, to))
}

#[must_use]
pub fn fs_unlink<S: PrefsStorage + ?Sized>(storage: &S, path: &str) -> bool {
    ok_or_false("unlink", storage.unlink(path))
}

#[must_use]
pub fn fs_clean_dir<S: PrefsStorage + ?Sized>(storage: &S, path: &str) -> bool {
    ok_or_false("clean_dir", storage.clean_dir(path))
}
