//! Error types for batch filesystem operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout fsbatch.
pub type OpResult<T> = Result<T, OpError>;

/// Errors that can occur while resolving or executing an operation.
#[derive(Debug, Error)]
pub enum OpError {
    /// The operation tag was not recognized.
    #[error("Unknown operation \"{operation}\"")]
    UnknownOperation { operation: String },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required parameter was not supplied.
    #[error("Missing required parameter '{name}' for item {index}")]
    MissingParameter { name: &'static str, index: usize },

    /// A parameter was supplied but had the wrong shape.
    #[error("Invalid parameter '{name}' for item {index}: {reason}")]
    InvalidParameter {
        name: &'static str,
        index: usize,
        reason: String,
    },

    /// The encoding label was not recognized.
    #[error("Unknown encoding '{name}'")]
    UnknownEncoding { name: String },

    /// File bytes were not valid in the requested encoding.
    #[error("Content of {path} is not valid {encoding}")]
    Decode {
        encoding: &'static str,
        path: PathBuf,
    },

    /// Text could not be represented in the requested encoding.
    #[error("Data is not valid {encoding}: {reason}")]
    Encode {
        encoding: &'static str,
        reason: String,
    },

    /// The external archiver exited with a failure status.
    #[error("Archiver '{program}' exited with {}", display_exit(.code))]
    Archiver {
        program: &'static str,
        code: Option<i32>,
    },

    /// The external archiver could not be started.
    #[error("Failed to spawn archiver '{program}': {source}")]
    ArchiverSpawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A pipe failed while streaming bytes to or from the archiver.
    #[error("Stream error during {stage}: {source}")]
    Stream {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The operation is not available on this platform.
    #[error("Operation not supported on this platform: {operation}")]
    Unsupported { operation: &'static str },

    /// A blocking worker task could not be joined.
    #[error("Worker task failed: {message}")]
    Task { message: String },

    /// An error tagged with the index of the failing item.
    #[error("Item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<OpError>,
    },
}

impl OpError {
    /// Create an I/O error with path context.
    ///
    /// Maps not-found and permission-denied kinds to their dedicated
    /// variants so callers can match on them directly.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Attach the failing item's index.
    ///
    /// Domain errors that already name their cause (`UnknownOperation`)
    /// and errors that already carry an index pass through unchanged.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        match self {
            Self::UnknownOperation { .. } | Self::Item { .. } => self,
            other => Self::Item {
                index,
                source: Box::new(other),
            },
        }
    }
}

fn display_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_not_found() {
        let err = OpError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, OpError::NotFound { .. }));
    }

    #[test]
    fn test_io_maps_permission_denied() {
        let err = OpError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, OpError::PermissionDenied { .. }));
    }

    #[test]
    fn test_with_index_wraps_io_errors() {
        let err = OpError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        )
        .with_index(3);
        assert!(matches!(err, OpError::Item { index: 3, .. }));
        assert!(err.to_string().starts_with("Item 3:"));
    }

    #[test]
    fn test_with_index_passes_domain_errors_through() {
        let err = OpError::UnknownOperation {
            operation: "teleport".to_string(),
        }
        .with_index(1);
        assert!(matches!(err, OpError::UnknownOperation { .. }));
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_with_index_does_not_double_wrap() {
        let err = OpError::Task {
            message: "gone".into(),
        }
        .with_index(0)
        .with_index(5);
        assert!(matches!(err, OpError::Item { index: 0, .. }));
    }

    #[test]
    fn test_archiver_error_display() {
        let err = OpError::Archiver {
            program: "tar",
            code: Some(2),
        };
        assert_eq!(err.to_string(), "Archiver 'tar' exited with status 2");

        let killed = OpError::Archiver {
            program: "tar",
            code: None,
        };
        assert_eq!(killed.to_string(), "Archiver 'tar' exited with signal");
    }
}
