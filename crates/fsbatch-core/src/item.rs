//! Invocation items and their outcomes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::OpError;

/// One unit of input to the batch runner.
///
/// Items carry an arbitrary key-value record supplied by the host;
/// the runner augments a copy of that record with the operation's
/// output fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// The item's key-value record.
    pub json: Map<String, Value>,
}

impl Item {
    /// Create an item with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item from an existing record.
    pub fn from_json(json: Map<String, Value>) -> Self {
        Self { json }
    }
}

/// One output record produced by the batch runner.
///
/// Every processed item yields exactly one outcome in input order. A
/// tolerated failure keeps the item's original record alongside the
/// error and the index of the item it pairs with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// The item's record, augmented with output fields on success.
    pub json: Map<String, Value>,

    /// The error message, present only for tolerated failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Index of the originating input item, present only on failure.
    #[serde(rename = "pairedItem", skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<usize>,
}

impl Outcome {
    /// Create a success outcome from an augmented record.
    pub fn success(json: Map<String, Value>) -> Self {
        Self {
            json,
            error: None,
            paired_item: None,
        }
    }

    /// Create a tolerated-failure outcome carrying the original record.
    pub fn failure(json: Map<String, Value>, error: &OpError, index: usize) -> Self {
        Self {
            json,
            error: Some(error.to_string()),
            paired_item: Some(index),
        }
    }

    /// Whether this outcome records a successful operation.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
