//! Parameter resolution for batch operations.
//!
//! The runner never sees its host's parameter machinery; it is handed a
//! [`ParameterSource`], a pure lookup keyed by parameter name and item
//! index. [`Params`] binds a source to one item and layers typed
//! accessors with defaults on top.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{OpError, OpResult};

/// A pure lookup of per-item operation parameters.
pub trait ParameterSource {
    /// Resolve the value of `name` for the item at `index`.
    fn value(&self, name: &str, index: usize) -> Option<Value>;

    /// Whether a failure of the item at `index` should be recorded
    /// rather than aborting the batch.
    fn continue_on_fail(&self, _index: usize) -> bool {
        false
    }
}

/// Typed view of one item's parameters.
pub struct Params<'a> {
    source: &'a dyn ParameterSource,
    index: usize,
}

impl<'a> Params<'a> {
    /// Bind a parameter source to the item at `index`.
    pub fn new(source: &'a dyn ParameterSource, index: usize) -> Self {
        Self { source, index }
    }

    /// Index of the item this view is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fetch a required string parameter.
    pub fn require_str(&self, name: &'static str) -> OpResult<String> {
        match self.source.value(name, self.index) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(self.invalid(name, &other)),
            None => Err(OpError::MissingParameter {
                name,
                index: self.index,
            }),
        }
    }

    /// Fetch an optional string parameter, falling back to `default`.
    pub fn str_or(&self, name: &'static str, default: &str) -> OpResult<String> {
        match self.source.value(name, self.index) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(self.invalid(name, &other)),
            None => Ok(default.to_string()),
        }
    }

    /// Fetch an optional boolean parameter, falling back to `default`.
    pub fn bool_or(&self, name: &'static str, default: bool) -> OpResult<bool> {
        match self.source.value(name, self.index) {
            Some(Value::Bool(value)) => Ok(value),
            Some(other) => Err(self.invalid(name, &other)),
            None => Ok(default),
        }
    }

    /// Fetch an optional non-negative integer parameter, falling back
    /// to `default`.
    pub fn u32_or(&self, name: &'static str, default: u32) -> OpResult<u32> {
        match self.source.value(name, self.index) {
            Some(Value::Number(value)) => value
                .as_u64()
                .and_then(|raw| u32::try_from(raw).ok())
                .ok_or_else(|| OpError::InvalidParameter {
                    name,
                    index: self.index,
                    reason: format!("{value} is out of range"),
                }),
            Some(other) => Err(self.invalid(name, &other)),
            None => Ok(default),
        }
    }

    fn invalid(&self, name: &'static str, value: &Value) -> OpError {
        OpError::InvalidParameter {
            name,
            index: self.index,
            reason: format!("unexpected value {value}"),
        }
    }
}

/// In-memory [`ParameterSource`] for embedders and tests.
///
/// Values can be set per item index or globally; per-index values win.
#[derive(Debug, Clone, Default)]
pub struct StaticParams {
    values: HashMap<(usize, String), Value>,
    globals: HashMap<String, Value>,
    tolerate_failures: bool,
}

impl StaticParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter for one item.
    #[must_use]
    pub fn set(mut self, index: usize, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert((index, name.into()), value.into());
        self
    }

    /// Set a parameter for every item.
    #[must_use]
    pub fn set_global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }

    /// Record failures instead of aborting the batch.
    #[must_use]
    pub fn tolerate_failures(mut self, tolerate: bool) -> Self {
        self.tolerate_failures = tolerate;
        self
    }
}

impl ParameterSource for StaticParams {
    fn value(&self, name: &str, index: usize) -> Option<Value> {
        self.values
            .get(&(index, name.to_string()))
            .or_else(|| self.globals.get(name))
            .cloned()
    }

    fn continue_on_fail(&self, _index: usize) -> bool {
        self.tolerate_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_str_present_and_missing() {
        let source = StaticParams::new().set(0, "sourcePath", "/tmp/a");
        let params = Params::new(&source, 0);
        assert_eq!(params.require_str("sourcePath").unwrap(), "/tmp/a");

        let err = params.require_str("destinationPath").unwrap_err();
        assert!(matches!(
            err,
            OpError::MissingParameter {
                name: "destinationPath",
                index: 0
            }
        ));
    }

    #[test]
    fn test_defaults_apply_when_absent() {
        let source = StaticParams::new();
        let params = Params::new(&source, 2);
        assert!(params.bool_or("recursive", true).unwrap());
        assert_eq!(params.u32_or("mode", 0o644).unwrap(), 0o644);
        assert_eq!(params.str_or("encoding", "utf8").unwrap(), "utf8");
    }

    #[test]
    fn test_wrong_shape_is_invalid_not_missing() {
        let source = StaticParams::new().set(1, "recursive", "yes");
        let params = Params::new(&source, 1);
        assert!(matches!(
            params.bool_or("recursive", true).unwrap_err(),
            OpError::InvalidParameter {
                name: "recursive",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_per_index_value_wins_over_global() {
        let source = StaticParams::new()
            .set_global("operation", "read")
            .set(1, "operation", "write");
        assert_eq!(
            Params::new(&source, 0).require_str("operation").unwrap(),
            "read"
        );
        assert_eq!(
            Params::new(&source, 1).require_str("operation").unwrap(),
            "write"
        );
    }

    #[test]
    fn test_mode_out_of_range() {
        let source = StaticParams::new().set(0, "mode", u64::from(u32::MAX) + 1);
        let params = Params::new(&source, 0);
        assert!(matches!(
            params.u32_or("mode", 0o644).unwrap_err(),
            OpError::InvalidParameter { name: "mode", .. }
        ));
    }
}
