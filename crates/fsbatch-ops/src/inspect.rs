//! Read-only probes: list, exists, metadata.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fsbatch_core::{OpError, OpResult};

/// Stat report for one path, taken without following a final symlink.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PathInfo {
    pub size: u64,
    pub mtime: DateTime<Utc>,
    pub atime: DateTime<Utc>,
    pub is_directory: bool,
    pub is_file: bool,
}

/// List the immediate child names of a directory.
///
/// Names come back in the order the underlying directory yields them;
/// callers wanting determinism sort on their side.
pub(crate) fn list(target: &Path) -> OpResult<Vec<String>> {
    let entries = fs::read_dir(target).map_err(|err| OpError::io(target, err))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| OpError::io(target, err))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Probe whether the path is accessible. Never errors: any failure to
/// stat the path reports `false`.
pub(crate) fn exists(target: &Path) -> bool {
    fs::metadata(target).is_ok()
}

/// Stat the path without following a final symlink.
pub(crate) fn metadata(target: &Path) -> OpResult<PathInfo> {
    let meta = fs::symlink_metadata(target).map_err(|err| OpError::io(target, err))?;
    let mtime = meta.modified().map_err(|err| OpError::io(target, err))?;
    let atime = meta.accessed().map_err(|err| OpError::io(target, err))?;
    Ok(PathInfo {
        size: meta.len(),
        mtime: to_utc(mtime),
        atime: to_utc(atime),
        is_directory: meta.is_dir(),
        is_file: meta.is_file(),
    })
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
