//! Operation tags.

use serde::{Deserialize, Serialize};

use fsbatch_core::{OpError, OpResult};

/// The filesystem action selected for one invocation item.
///
/// `Move` and `Rename` are distinct tags with identical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Remove,
    Copy,
    Move,
    Rename,
    Read,
    Write,
    Append,
    List,
    Exists,
    Metadata,
    Chmod,
    Compress,
    Extract,
}

impl Operation {
    /// Parse an operation tag.
    pub fn from_tag(tag: &str) -> OpResult<Self> {
        match tag {
            "create" => Ok(Self::Create),
            "remove" => Ok(Self::Remove),
            "copy" => Ok(Self::Copy),
            "move" => Ok(Self::Move),
            "rename" => Ok(Self::Rename),
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "append" => Ok(Self::Append),
            "list" => Ok(Self::List),
            "exists" => Ok(Self::Exists),
            "metadata" => Ok(Self::Metadata),
            "chmod" => Ok(Self::Chmod),
            "compress" => Ok(Self::Compress),
            "extract" => Ok(Self::Extract),
            other => Err(OpError::UnknownOperation {
                operation: other.to_string(),
            }),
        }
    }

    /// The tag string for this operation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Rename => "rename",
            Self::Read => "read",
            Self::Write => "write",
            Self::Append => "append",
            Self::List => "list",
            Self::Exists => "exists",
            Self::Metadata => "metadata",
            Self::Chmod => "chmod",
            Self::Compress => "compress",
            Self::Extract => "extract",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for tag in [
            "create", "remove", "copy", "move", "rename", "read", "write", "append", "list",
            "exists", "metadata", "chmod", "compress", "extract",
        ] {
            assert_eq!(Operation::from_tag(tag).unwrap().as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_names_itself() {
        let err = Operation::from_tag("teleport").unwrap_err();
        assert!(matches!(err, OpError::UnknownOperation { .. }));
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(Operation::from_tag("Copy").is_err());
    }
}
