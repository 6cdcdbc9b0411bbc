//! Resolved operation requests.
//!
//! A [`Request`] is an operation tag plus its parameters, fetched from
//! the parameter source and converted to owned, typed values. Resolving
//! up front keeps execution `Send + 'static` and free of the host
//! collaborator, so it can run on the blocking pool.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use fsbatch_core::{Encoding, OpResult, Params};

use crate::operation::Operation;
use crate::{archive, content, copy, create, inspect, move_op, permissions, remove};

/// Default permission bits for `chmod`.
const DEFAULT_MODE: u32 = 0o644;

/// An operation with its parameters resolved for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create {
        source: PathBuf,
    },
    Remove {
        source: PathBuf,
        recursive: bool,
    },
    Copy {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Serves both the `move` and `rename` tags.
    Relocate {
        source: PathBuf,
        destination: PathBuf,
    },
    Read {
        target: PathBuf,
        encoding: Encoding,
    },
    Write {
        target: PathBuf,
        data: String,
        encoding: Encoding,
    },
    Append {
        target: PathBuf,
        data: String,
        encoding: Encoding,
    },
    List {
        target: PathBuf,
    },
    Exists {
        target: PathBuf,
    },
    Metadata {
        target: PathBuf,
    },
    Chmod {
        target: PathBuf,
        mode: u32,
    },
    Compress {
        source: PathBuf,
        destination: PathBuf,
    },
    Extract {
        source: PathBuf,
        destination: PathBuf,
    },
}

impl Request {
    /// Resolve the parameters for `operation` from one item's view.
    pub fn resolve(operation: Operation, params: &Params<'_>) -> OpResult<Self> {
        match operation {
            Operation::Create => Ok(Self::Create {
                source: params.require_str("sourcePath")?.into(),
            }),
            Operation::Remove => Ok(Self::Remove {
                source: params.require_str("sourcePath")?.into(),
                recursive: params.bool_or("recursive", true)?,
            }),
            Operation::Copy => Ok(Self::Copy {
                source: params.require_str("sourcePath")?.into(),
                destination: params.require_str("destinationPath")?.into(),
            }),
            Operation::Move | Operation::Rename => Ok(Self::Relocate {
                source: params.require_str("sourcePath")?.into(),
                destination: params.require_str("destinationPath")?.into(),
            }),
            Operation::Read => Ok(Self::Read {
                target: params.require_str("targetPath")?.into(),
                encoding: resolve_encoding(params)?,
            }),
            Operation::Write => Ok(Self::Write {
                target: params.require_str("targetPath")?.into(),
                data: params.str_or("data", "")?,
                encoding: resolve_encoding(params)?,
            }),
            Operation::Append => Ok(Self::Append {
                target: params.require_str("targetPath")?.into(),
                data: params.str_or("data", "")?,
                encoding: resolve_encoding(params)?,
            }),
            Operation::List => Ok(Self::List {
                target: params.require_str("targetPath")?.into(),
            }),
            Operation::Exists => Ok(Self::Exists {
                target: params.require_str("targetPath")?.into(),
            }),
            Operation::Metadata => Ok(Self::Metadata {
                target: params.require_str("targetPath")?.into(),
            }),
            Operation::Chmod => Ok(Self::Chmod {
                target: params.require_str("targetPath")?.into(),
                mode: params.u32_or("mode", DEFAULT_MODE)?,
            }),
            Operation::Compress => Ok(Self::Compress {
                source: params.require_str("sourcePath")?.into(),
                destination: params.require_str("destinationPath")?.into(),
            }),
            Operation::Extract => Ok(Self::Extract {
                source: params.require_str("sourcePath")?.into(),
                destination: params.require_str("destinationPath")?.into(),
            }),
        }
    }

    /// Execute the request, returning the output fields to merge into
    /// the item's record (echoed paths included).
    pub fn execute(self) -> OpResult<Map<String, Value>> {
        let mut fields = Map::new();
        match self {
            Self::Create { source } => {
                create::create_path(&source)?;
                insert_path(&mut fields, "sourcePath", &source);
            }
            Self::Remove { source, recursive } => {
                remove::remove_path(&source, recursive)?;
                insert_path(&mut fields, "sourcePath", &source);
            }
            Self::Copy {
                source,
                destination,
            } => {
                copy::copy_path(&source, &destination)?;
                insert_path(&mut fields, "sourcePath", &source);
                insert_path(&mut fields, "destinationPath", &destination);
            }
            Self::Relocate {
                source,
                destination,
            } => {
                move_op::relocate(&source, &destination)?;
                insert_path(&mut fields, "sourcePath", &source);
                insert_path(&mut fields, "destinationPath", &destination);
            }
            Self::Read { target, encoding } => {
                let data = content::read(&target, encoding)?;
                fields.insert("data".to_string(), Value::String(data));
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Write {
                target,
                data,
                encoding,
            } => {
                content::write(&target, &data, encoding)?;
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Append {
                target,
                data,
                encoding,
            } => {
                content::append(&target, &data, encoding)?;
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::List { target } => {
                let names = inspect::list(&target)?;
                fields.insert(
                    "list".to_string(),
                    Value::Array(names.into_iter().map(Value::String).collect()),
                );
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Exists { target } => {
                fields.insert("exists".to_string(), Value::Bool(inspect::exists(&target)));
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Metadata { target } => {
                let info = inspect::metadata(&target)?;
                if let Value::Object(entries) = serde_json::to_value(info).unwrap_or_default() {
                    fields.extend(entries);
                }
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Chmod { target, mode } => {
                permissions::chmod(&target, mode)?;
                fields.insert("mode".to_string(), Value::from(mode));
                insert_path(&mut fields, "targetPath", &target);
            }
            Self::Compress {
                source,
                destination,
            } => {
                archive::compress(&source, &destination)?;
                insert_path(&mut fields, "sourcePath", &source);
                insert_path(&mut fields, "destinationPath", &destination);
            }
            Self::Extract {
                source,
                destination,
            } => {
                archive::extract(&source, &destination)?;
                insert_path(&mut fields, "sourcePath", &source);
                insert_path(&mut fields, "destinationPath", &destination);
            }
        }
        Ok(fields)
    }
}

fn resolve_encoding(params: &Params<'_>) -> OpResult<Encoding> {
    Encoding::parse(&params.str_or("encoding", "utf8")?)
}

fn insert_path(fields: &mut Map<String, Value>, key: &str, path: &Path) {
    fields.insert(
        key.to_string(),
        Value::String(path.to_string_lossy().into_owned()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsbatch_core::{OpError, StaticParams};

    #[test]
    fn test_resolve_applies_defaults() {
        let source = StaticParams::new()
            .set(0, "sourcePath", "/tmp/dir")
            .set(0, "targetPath", "/tmp/file");

        let request = Request::resolve(Operation::Remove, &Params::new(&source, 0)).unwrap();
        assert_eq!(
            request,
            Request::Remove {
                source: "/tmp/dir".into(),
                recursive: true,
            }
        );

        let request = Request::resolve(Operation::Read, &Params::new(&source, 0)).unwrap();
        assert_eq!(
            request,
            Request::Read {
                target: "/tmp/file".into(),
                encoding: Encoding::Utf8,
            }
        );

        let request = Request::resolve(Operation::Chmod, &Params::new(&source, 0)).unwrap();
        assert_eq!(
            request,
            Request::Chmod {
                target: "/tmp/file".into(),
                mode: 0o644,
            }
        );
    }

    #[test]
    fn test_resolve_requires_destination_for_copy() {
        let source = StaticParams::new().set(0, "sourcePath", "/tmp/a");
        let err = Request::resolve(Operation::Copy, &Params::new(&source, 0)).unwrap_err();
        assert!(matches!(
            err,
            OpError::MissingParameter {
                name: "destinationPath",
                ..
            }
        ));
    }

    #[test]
    fn test_move_and_rename_resolve_identically() {
        let source = StaticParams::new()
            .set(0, "sourcePath", "/tmp/a")
            .set(0, "destinationPath", "/tmp/b");
        let moved = Request::resolve(Operation::Move, &Params::new(&source, 0)).unwrap();
        let renamed = Request::resolve(Operation::Rename, &Params::new(&source, 0)).unwrap();
        assert_eq!(moved, renamed);
    }

    #[test]
    fn test_resolve_rejects_unknown_encoding() {
        let source = StaticParams::new()
            .set(0, "targetPath", "/tmp/file")
            .set(0, "encoding", "ebcdic");
        let err = Request::resolve(Operation::Read, &Params::new(&source, 0)).unwrap_err();
        assert!(matches!(err, OpError::UnknownEncoding { .. }));
    }
}
