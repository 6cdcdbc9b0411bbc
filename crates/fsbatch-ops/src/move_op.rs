//! Move and rename, one underlying relocation.

use std::fs;
use std::path::Path;

use fsbatch_core::{OpError, OpResult};

/// Atomically rename the source to the destination.
pub(crate) fn relocate(source: &Path, destination: &Path) -> OpResult<()> {
    fs::rename(source, destination).map_err(|err| OpError::io(source, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relocate_file() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("old.txt");
        let dest = temp.path().join("new.txt");
        fs::write(&src, "payload").unwrap();

        relocate(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn test_relocate_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("child.txt"), "x").unwrap();

        let dest = temp.path().join("moved");
        relocate(&src, &dest).unwrap();
        assert!(dest.join("child.txt").exists());
        assert!(!src.exists());
    }

    #[test]
    fn test_relocate_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let err = relocate(&temp.path().join("gone"), &temp.path().join("dest")).unwrap_err();
        assert!(matches!(err, OpError::NotFound { .. }));
    }
}
