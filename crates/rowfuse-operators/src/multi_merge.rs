//! Multi-merge stage: N input streams in, one row stream out.
//!
//! Setup merges the input schemas into the output schema in stream order.
//! What happens per row depends on the duplicate policy:
//!
//! - `Prevent`: each output field appears once, so a bound reconciler picks
//!   its value from the stream the selection policy designates.
//! - `Rename`: every input field is kept, in stream order, so the output row
//!   is the input rows laid end to end. Renamed fields carry the value of the
//!   stream they came from; the selection policy does not apply.

use rowfuse_core::buffer::RowBuffer;
use rowfuse_core::config::{DuplicatePolicy, FuseConfig};
use rowfuse_core::schema::Schema;
use rowfuse_core::types::Row;

use crate::merge::SchemaMerger;
use crate::reconcile::{BoundReconciler, RowReconciler};
use crate::traits::{OpError, Result};

#[derive(Debug)]
enum Plan {
    Reconcile(BoundReconciler),
    Concat { lengths: Vec<usize>, buffer: RowBuffer },
}

#[derive(Debug, Default)]
pub struct MultiMerge {
    pub config: FuseConfig,
    plan: Option<Plan>,
}

impl MultiMerge {
    pub fn new(config: FuseConfig) -> Self {
        Self { config, plan: None }
    }

    /// Compute the output schema from `(origin, schema)` pairs, one per input
    /// stream, and prepare for `eval`. Calling it again replaces the previous
    /// plan.
    pub fn plan(&mut self, inputs: &[(&str, Schema)]) -> Result<Schema> {
        if inputs.is_empty() {
            return Err(OpError::Plan("multi merge expects at least one input".into()));
        }
        self.config.validate()?;

        let merger = SchemaMerger::new(self.config.duplicates);
        let mut output = Schema::default();
        for (origin, schema) in inputs {
            merger.merge_into(&mut output, schema, origin);
        }

        let plan = match self.config.duplicates {
            DuplicatePolicy::Prevent => {
                let schemas: Vec<Schema> = inputs.iter().map(|(_, s)| s.clone()).collect();
                let bound = RowReconciler::from_config(&self.config)
                    .bind(&schemas, &output)
                    .map_err(|e| e.with_context("multi merge plan"))?;
                Plan::Reconcile(bound)
            }
            DuplicatePolicy::Rename => Plan::Concat {
                lengths: inputs.iter().map(|(_, s)| s.len()).collect(),
                buffer: self.config.row_buffer(),
            },
        };
        self.plan = Some(plan);
        Ok(output)
    }

    /// Build one output row from one row per input stream, in the order given
    /// to `plan`.
    pub fn eval(&self, rows: &[&Row]) -> Result<Row> {
        match &self.plan {
            None => Err(OpError::Plan("multi merge evaluated before plan".into())),
            Some(Plan::Reconcile(bound)) => bound.reconcile(rows),
            Some(Plan::Concat { lengths, buffer }) => {
                if rows.len() != lengths.len() {
                    return Err(OpError::Plan(format!(
                        "multi merge given {} rows but planned for {} inputs",
                        rows.len(),
                        lengths.len()
                    )));
                }
                Ok(buffer.concat_copy(rows, lengths)?)
            }
        }
    }
}
