//! File and directory creation.

use std::fs;
use std::path::Path;

use fsbatch_core::{OpError, OpResult};

/// Create the path: an empty file when it carries an extension,
/// otherwise a directory (with parents).
///
/// An existing file is truncated; an existing directory is left alone.
pub(crate) fn create_path(path: &Path) -> OpResult<()> {
    if path.extension().is_some() {
        fs::write(path, b"").map_err(|source| OpError::io(path, source))
    } else {
        fs::create_dir_all(path).map_err(|source| OpError::io(path, source))
    }
}
