//! Permission changes.

use std::path::Path;

use fsbatch_core::{OpError, OpResult};

/// Set the path's permission bits from a raw numeric mode.
#[cfg(unix)]
pub(crate) fn chmod(target: &Path, mode: u32) -> OpResult<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(target, std::fs::Permissions::from_mode(mode))
        .map_err(|err| OpError::io(target, err))
}

#[cfg(not(unix))]
pub(crate) fn chmod(_target: &Path, _mode: u32) -> OpResult<()> {
    Err(OpError::Unsupported { operation: "chmod" })
}

#[cfg(all(unix, test))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn test_chmod_sets_low_permission_bits() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f.txt");
        fs::write(&path, "x").unwrap();

        chmod(&path, 0o600).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        chmod(&path, 0o755).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_chmod_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            chmod(&temp.path().join("gone"), 0o644).unwrap_err(),
            OpError::NotFound { .. }
        ));
    }
}
