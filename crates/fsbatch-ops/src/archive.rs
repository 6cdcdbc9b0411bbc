//! Compress and extract via an external archiver process.
//!
//! `compress` shells out to `tar -czf` from the source's parent
//! directory so the archive's root entry is the source's base name.
//! `extract` streams the archive through a gzip decompression filter
//! into the stdin of `tar -xf -`. Both treat a spawn failure or a
//! non-zero exit status as an operation failure, and the unpack
//! process is always awaited, even when the pipe breaks first.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use flate2::read::GzDecoder;

use fsbatch_core::{OpError, OpResult};

const ARCHIVER: &str = "tar";

/// Archive the source (file or directory) into a compressed tarball at
/// the destination, rooted at the source's base name.
pub(crate) fn compress(source: &Path, destination: &Path) -> OpResult<()> {
    let name = source.file_name().ok_or_else(|| {
        OpError::io(
            source,
            io::Error::new(ErrorKind::InvalidInput, "source has no base name"),
        )
    })?;
    let parent = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let status = Command::new(ARCHIVER)
        .arg("-czf")
        .arg(destination)
        .arg(name)
        .current_dir(parent)
        .status()
        .map_err(|source_err| OpError::ArchiverSpawn {
            program: ARCHIVER,
            source: source_err,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(OpError::Archiver {
            program: ARCHIVER,
            code: status.code(),
        })
    }
}

/// Create the destination directory and unpack the compressed archive
/// at the source into it.
pub(crate) fn extract(source: &Path, destination: &Path) -> OpResult<()> {
    fs::create_dir_all(destination).map_err(|err| OpError::io(destination, err))?;

    let file = File::open(source).map_err(|err| OpError::io(source, err))?;
    let mut decoder = GzDecoder::new(file);

    let mut child = Command::new(ARCHIVER)
        .arg("-xf")
        .arg("-")
        .arg("-C")
        .arg(destination)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|source_err| OpError::ArchiverSpawn {
            program: ARCHIVER,
            source: source_err,
        })?;

    // The stdin handle must be dropped before waiting, or the unpacker
    // never sees end-of-input.
    let piped = match child.stdin.take() {
        Some(mut stdin) => io::copy(&mut decoder, &mut stdin).map(drop),
        None => Err(io::Error::new(
            ErrorKind::BrokenPipe,
            "archiver stdin unavailable",
        )),
    };

    // Reap the process on every path, including pipe failures.
    let waited = child.wait();

    piped.map_err(|err| OpError::Stream {
        stage: "extract",
        source: err,
    })?;
    let status = waited.map_err(|err| OpError::Stream {
        stage: "extract.wait",
        source: err,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(OpError::Archiver {
            program: ARCHIVER,
            code: status.code(),
        })
    }
}

#[cfg(all(unix, test))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compress_then_extract_round_trips_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("payload");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("root.txt"), "root").unwrap();
        fs::write(src.join("sub/leaf.txt"), "leaf").unwrap();

        let archive = temp.path().join("payload.tar.gz");
        compress(&src, &archive).unwrap();
        assert!(archive.is_file());

        let out = temp.path().join("out");
        extract(&archive, &out).unwrap();

        // unpacked under the archive's root-name subdirectory
        assert_eq!(fs::read(out.join("payload/root.txt")).unwrap(), b"root");
        assert_eq!(fs::read(out.join("payload/sub/leaf.txt")).unwrap(), b"leaf");
    }

    #[test]
    fn test_compress_single_file() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("single.txt");
        fs::write(&src, "contents").unwrap();

        let archive = temp.path().join("single.tar.gz");
        compress(&src, &archive).unwrap();

        let out = temp.path().join("out");
        extract(&archive, &out).unwrap();
        assert_eq!(fs::read(out.join("single.txt")).unwrap(), b"contents");
    }

    #[test]
    fn test_compress_missing_source_reports_archiver_failure() {
        let temp = TempDir::new().unwrap();
        let err = compress(
            &temp.path().join("gone"),
            &temp.path().join("gone.tar.gz"),
        )
        .unwrap_err();
        assert!(matches!(err, OpError::Archiver { code: Some(_), .. }));
    }

    #[test]
    fn test_extract_of_garbage_fails() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("bogus.tar.gz");
        fs::write(&bogus, "this is not gzip data").unwrap();

        let err = extract(&bogus, &temp.path().join("out")).unwrap_err();
        assert!(matches!(
            err,
            OpError::Stream { .. } | OpError::Archiver { .. }
        ));
    }

    #[test]
    fn test_extract_missing_archive_fails_before_spawning() {
        let temp = TempDir::new().unwrap();
        let err = extract(&temp.path().join("gone.tar.gz"), &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, OpError::NotFound { .. }));
    }
}
