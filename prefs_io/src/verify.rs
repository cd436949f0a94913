//! Bounded content comparison against an open file.

use fs_runtime::FileHandle;

use crate::error::PrefsError;

/// Size of the stack buffer used to stream file content during comparison.
pub const VERIFY_CHUNK: usize = 1024;

/// Compare the content of `file`, read from its current position, with `expected`.
///
/// Fails without reading when the file size differs from `expected.len()` or
/// the length exceeds `limit`. Content is streamed through a fixed-size
/// buffer, so memory use does not depend on the caller's length.
pub(crate) fn verify_content<H: FileHandle>(
    file: &mut H,
    path: &str,
    expected: &[u8],
    limit: Option<usize>,
) -> Result<(), PrefsError> {
    let size = file.size();
    if size != expected.len() as u64 {
        return Err(PrefsError::SizeMismatch {
            path: path.to_string(),
            expected: expected.len(),
            actual: size,
        });
    }
    if let Some(limit) = limit {
        if expected.len() > limit {
            return Err(PrefsError::TooLarge {
                path: path.to_string(),
                len: expected.len(),
                limit,
            });
        }
    }

    let mut chunk = [0u8; VERIFY_CHUNK];
    let mut offset = 0;
    while offset < expected.len() {
        let want = (expected.len() - offset).min(VERIFY_CHUNK);
        let n = file
            .read(&mut chunk[..want])
            .map_err(|kind| PrefsError::io(path, kind))?;
        if n == 0 {
            // File shrank under us
            return Err(PrefsError::SizeMismatch {
                path: path.to_string(),
                expected: expected.len(),
                actual: offset as u64,
            });
        }
        if chunk[..n] != expected[offset..offset + n] {
            return Err(PrefsError::ContentMismatch {
                path: path.to_string(),
            });
        }
        offset += n;
    }
    Ok(())
}
