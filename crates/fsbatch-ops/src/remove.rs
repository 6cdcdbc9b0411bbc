//! File and directory removal.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use fsbatch_core::{OpError, OpResult};

/// Remove the path.
///
/// Directories (detected without following a final symlink) are removed
/// recursively when `recursive` is set, tolerating a path that vanished;
/// non-recursive removal fails on a non-empty directory. Anything else
/// is deleted as a file.
pub(crate) fn remove_path(path: &Path, recursive: bool) -> OpResult<()> {
    let is_dir = fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if is_dir {
        if recursive {
            match fs::remove_dir_all(path) {
                Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
                result => result.map_err(|source| OpError::io(path, source)),
            }
        } else {
            fs::remove_dir(path).map_err(|source| OpError::io(path, source))
        }
    } else {
        match fs::remove_file(path) {
            // recursive removal is force-like: a missing path is not an error
            Err(source) if recursive && source.kind() == ErrorKind::NotFound => Ok(()),
            result => result.map_err(|source| OpError::io(path, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "x").unwrap();
        remove_path(&path, false).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_non_empty_directory_requires_recursive() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("child.txt"), "x").unwrap();

        assert!(remove_path(&dir, false).is_err());
        assert!(dir.exists());

        remove_path(&dir, true).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_recursive_remove_tolerates_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        remove_path(&missing, true).unwrap();
    }

    #[test]
    fn test_non_recursive_remove_of_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        assert!(matches!(
            remove_path(&missing, false).unwrap_err(),
            OpError::NotFound { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_symlink_deletes_link_not_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target.txt");
        let link = temp.path().join("link");
        fs::write(&target, "kept").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        remove_path(&link, false).unwrap();
        assert!(!link.exists());
        assert!(target.exists());
    }
}
