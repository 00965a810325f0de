//! Atomic output file writes.
//!
//! The rendered bytes go to a temporary file in the destination directory,
//! which is then renamed over the target. Readers never see a partial
//! diagram, and a failed render leaves any previous file untouched.

use std::{io::Write, path::Path};

use log::debug;
use tempfile::NamedTempFile;

use crate::VoldiagError;

/// Writes `contents` to `path`, replacing any existing file in one step.
///
/// # Errors
///
/// Returns [`VoldiagError::Io`] if the parent directory does not exist or is
/// not writable, or if the final rename fails.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), VoldiagError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    debug!(temp_path:? = temp_file.path(), bytes = contents.len(); "Output staged");

    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.svg");

        write_atomically(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.svg");

        write_atomically(&path, b"first, longer contents").unwrap();
        write_atomically(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // No staging files are left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_fails_without_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.svg");

        let err = write_atomically(&path, b"<svg/>").unwrap_err();
        assert!(matches!(err, VoldiagError::Io(_)), "{err}");
        assert!(!path.exists());
    }
}
