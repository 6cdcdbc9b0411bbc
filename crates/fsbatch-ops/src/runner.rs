//! The batch operation runner.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use fsbatch_core::{Item, OpError, OpResult, Outcome, ParameterSource, Params};

use crate::operation::Operation;
use crate::request::Request;

/// Runs a sequence of invocation items against the filesystem.
///
/// Items are processed strictly one at a time, in input order; each
/// yields exactly one [`Outcome`] in the same position. Filesystem work
/// runs on the blocking pool, but the runner awaits each operation
/// before starting the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner;

impl BatchRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }

    /// Process every item, resolving parameters from `source`.
    ///
    /// # Errors
    ///
    /// In strict mode (the source's per-item probe returns `false`) the
    /// first failure aborts the batch, tagged with the failing item's
    /// index; outcomes produced so far are discarded. In tolerant mode
    /// failures are recorded as outcomes and the batch runs to
    /// completion.
    pub async fn run(
        &self,
        items: Vec<Item>,
        source: &dyn ParameterSource,
    ) -> OpResult<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            match Self::process_item(&item, index, source).await {
                Ok(json) => outcomes.push(Outcome::success(json)),
                Err(error) if source.continue_on_fail(index) => {
                    warn!(index, error = %error, "operation failed; continuing");
                    outcomes.push(Outcome::failure(item.json, &error, index));
                }
                Err(error) => return Err(error.with_index(index)),
            }
        }

        Ok(outcomes)
    }

    async fn process_item(
        item: &Item,
        index: usize,
        source: &dyn ParameterSource,
    ) -> OpResult<Map<String, Value>> {
        let params = Params::new(source, index);
        let operation = Operation::from_tag(&params.require_str("operation")?)?;
        let request = Request::resolve(operation, &params)?;
        debug!(index, operation = operation.as_str(), "dispatching");

        let fields = tokio::task::spawn_blocking(move || request.execute())
            .await
            .map_err(|join_err| OpError::Task {
                message: join_err.to_string(),
            })??;

        // Augment a copy so a tolerated failure can still hand back the
        // item's original record.
        let mut json = item.json.clone();
        json.extend(fields);
        json.insert(
            "operation".to_string(),
            Value::String(operation.as_str().to_string()),
        );
        json.insert("success".to_string(), Value::Bool(true));
        Ok(json)
    }
}
