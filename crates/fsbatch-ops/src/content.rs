//! File content operations: read, write, append.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use fsbatch_core::{Encoding, OpError, OpResult};

/// Read the whole file and decode it with the given encoding.
pub(crate) fn read(target: &Path, encoding: Encoding) -> OpResult<String> {
    let bytes = fs::read(target).map_err(|err| OpError::io(target, err))?;
    encoding.decode(&bytes, target)
}

/// Encode the content and overwrite (or create) the file.
pub(crate) fn write(target: &Path, data: &str, encoding: Encoding) -> OpResult<()> {
    let bytes = encoding.encode(data)?;
    fs::write(target, bytes).map_err(|err| OpError::io(target, err))
}

/// Encode the content and append it to the file, creating it if absent.
pub(crate) fn append(target: &Path, data: &str, encoding: Encoding) -> OpResult<()> {
    let bytes = encoding.encode(data)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(target)
        .map_err(|err| OpError::io(target, err))?;
    file.write_all(&bytes).map_err(|err| OpError::io(target, err))
}
