//! Copy operation, including the recursive directory mirror.

use std::fs;
use std::path::{Path, PathBuf};

use fsbatch_core::{OpError, OpResult};

/// Copy the source to the destination.
///
/// A directory is mirrored recursively: subdirectories are created,
/// regular files copied byte for byte, and symbolic links recreated
/// pointing at the same target (their content is not followed). A
/// non-directory source is copied as a single file.
pub(crate) fn copy_path(source: &Path, destination: &Path) -> OpResult<()> {
    let is_dir = fs::symlink_metadata(source)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if is_dir {
        copy_dir(source, destination)
    } else {
        fs::copy(source, destination)
            .map(drop)
            .map_err(|err| OpError::io(source, err))
    }
}

/// Mirror a directory tree using an explicit worklist of
/// (source, destination) pairs, so arbitrarily deep trees cannot
/// exhaust the call stack.
fn copy_dir(source: &Path, destination: &Path) -> OpResult<()> {
    let mut pending: Vec<(PathBuf, PathBuf)> =
        vec![(source.to_path_buf(), destination.to_path_buf())];

    while let Some((src, dest)) = pending.pop() {
        fs::create_dir_all(&dest).map_err(|err| OpError::io(&dest, err))?;

        let entries = fs::read_dir(&src).map_err(|err| OpError::io(&src, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| OpError::io(&src, err))?;
            let src_path = entry.path();
            let dest_path = dest.join(entry.file_name());
            let file_type = entry
                .file_type()
                .map_err(|err| OpError::io(&src_path, err))?;

            if file_type.is_dir() {
                pending.push((src_path, dest_path));
            } else if file_type.is_symlink() {
                let link_target = fs::read_link(&src_path).map_err(|err| OpError::io(&src_path, err))?;
                make_symlink(&link_target, &dest_path)?;
            } else {
                fs::copy(&src_path, &dest_path).map_err(|err| OpError::io(&src_path, err))?;
            }
        }
    }

    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> OpResult<()> {
    std::os::unix::fs::symlink(target, link).map_err(|err| OpError::io(link, err))
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> OpResult<()> {
    std::os::windows::fs::symlink_file(target, link).map_err(|err| OpError::io(link, err))
}
