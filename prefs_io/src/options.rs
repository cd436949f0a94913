use serde::Deserialize;

/// Largest content length `verify` compares by default.
pub const DEFAULT_VERIFY_LIMIT: usize = 1024;

/// Tunables for [`crate::PrefsFs`]
///
/// Missing JSON fields take their defaults; `"verify_limit": null` removes
/// the limit.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PrefsOptions {
    /// Content longer than this never verifies. `None` verifies any length.
    pub verify_limit: Option<usize>,
    /// `clean_dir` removes the directory contents before the directory itself.
    pub recursive_clean: bool,
}

impl Default for PrefsOptions {
    fn default() -> Self {
        Self {
            verify_limit: Some(DEFAULT_VERIFY_LIMIT),
            recursive_clean: true,
        }
    }
}

impl PrefsOptions {
    /// Creates a new `PrefsOptions` instance by reading JSON from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The JSON input is invalid, malformed or has unknown fields
    /// - There are I/O errors reading from the provided reader
    pub fn from_reader(mut reader: impl embedded_io::Read) -> Result<PrefsOptions, String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            match embedded_io::Read::read(&mut reader, &mut chunk) {
                Ok(0) => break,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) => return Err(format!("Failed to read prefs options: {e:?}")),
            }
        }

        serde_json::from_slice(&buffer).map_err(|e| format!("Failed to parse prefs options JSON: {e}"))
    }

    #[must_use]
    pub fn with_verify_limit(mut self, limit: Option<usize>) -> Self {
        self.verify_limit = limit;
        self
    }

    #[must_use]
    pub fn with_recursive_clean(mut self, recursive: bool) -> Self {
        self.recursive_clean = recursive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PrefsOptions::default();
        assert_eq!(opts.verify_limit, Some(1024));
        assert!(opts.recursive_clean);
    }

    #[test]
    fn test_builders() {
        let opts = PrefsOptions::default()
            .with_verify_limit(None)
            .with_recursive_clean(false);
        assert_eq!(opts.verify_limit, None);
        assert!(!opts.recursive_clean);
    }
}
