//! Multi-input row reconciliation.
//!
//! Builds one output row from N input rows of differing shape. Each output
//! field is looked up by name in the input schemas and its value taken from
//! whichever stream the [`SelectionPolicy`] picks:
//!
//! - `UseFirst` / `UseLast`: first match scanning streams forward / backward.
//! - `UseFirstNotNull` / `UseLastNotNull`: same scan, but null matches are
//!   passed over; if every match is null the result is null.
//!
//! An output field carried by no input is filled with null or reported,
//! depending on the [`MissingFieldPolicy`].
//!
//! [`RowReconciler::reconcile`] does the name lookups on every call. Stages
//! that reconcile many rows against the same schemas should
//! [`RowReconciler::bind`] once and use the resulting [`BoundReconciler`].

use rowfuse_core::buffer::RowBuffer;
use rowfuse_core::config::{FuseConfig, MissingFieldPolicy, SelectionPolicy};
use rowfuse_core::schema::Schema;
use rowfuse_core::types::{Row, Value};

use crate::traits::{OpError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct RowReconciler {
    policy: SelectionPolicy,
    missing: MissingFieldPolicy,
    buffer: RowBuffer,
}

impl RowReconciler {
    pub fn new(policy: SelectionPolicy, missing: MissingFieldPolicy) -> Self {
        Self {
            policy,
            missing,
            buffer: RowBuffer::default(),
        }
    }

    pub fn from_config(cfg: &FuseConfig) -> Self {
        Self {
            policy: cfg.selection,
            missing: cfg.missing_field,
            buffer: cfg.row_buffer(),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Project `rows` (described by `schemas`, one per row) onto `output`.
    pub fn reconcile(&self, rows: &[&Row], schemas: &[Schema], output: &Schema) -> Result<Row> {
        check_arity(rows.len(), schemas.len())?;

        let mut out = self.buffer.allocate(output.len());
        for (i, field) in output.fields().iter().enumerate() {
            out[i] = self.select(rows, schemas, &field.name)?;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(inputs = rows.len(), fields = output.len(), "reconciled row");

        Ok(out)
    }

    fn select(&self, rows: &[&Row], schemas: &[Schema], name: &str) -> Result<Value> {
        let mut found = false;
        for stream in scan_order(self.policy, schemas.len()) {
            let Some(pos) = schemas[stream].index_of(name) else {
                continue;
            };
            found = true;
            let value = slot(rows[stream], stream, pos)?;
            if self.policy.skips_nulls() && value.is_null() {
                continue;
            }
            return Ok(value.clone());
        }

        if !found && self.missing == MissingFieldPolicy::Fail {
            return Err(OpError::MissingField(name.to_string()));
        }
        Ok(Value::Null)
    }

    /// Resolve every output field against `schemas` once.
    ///
    /// With [`MissingFieldPolicy::Fail`] an unresolvable field is reported
    /// here rather than on the first row.
    pub fn bind(&self, schemas: &[Schema], output: &Schema) -> Result<BoundReconciler> {
        let mut candidates = Vec::with_capacity(output.len());
        for field in output.fields() {
            let mut found: Vec<(usize, usize)> = scan_order(self.policy, schemas.len())
                .filter_map(|stream| schemas[stream].index_of(&field.name).map(|pos| (stream, pos)))
                .collect();
            if found.is_empty() && self.missing == MissingFieldPolicy::Fail {
                return Err(OpError::MissingField(field.name.clone()));
            }
            // Without null skipping only the first match is ever read.
            if !self.policy.skips_nulls() {
                found.truncate(1);
            }
            candidates.push(found);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            policy = ?self.policy,
            inputs = schemas.len(),
            fields = output.len(),
            unresolved = candidates.iter().filter(|c| c.is_empty()).count(),
            "bound reconciler"
        );

        Ok(BoundReconciler {
            inputs: schemas.len(),
            candidates,
            buffer: self.buffer,
        })
    }
}

/// A reconciler with every output field already resolved to its candidate
/// `(stream, position)` slots, in the order the policy reads them.
#[derive(Debug, Clone)]
pub struct BoundReconciler {
    inputs: usize,
    candidates: Vec<Vec<(usize, usize)>>,
    buffer: RowBuffer,
}

impl BoundReconciler {
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn width(&self) -> usize {
        self.candidates.len()
    }

    pub fn reconcile(&self, rows: &[&Row]) -> Result<Row> {
        check_arity(rows.len(), self.inputs)?;

        let mut out = self.buffer.allocate(self.candidates.len());
        for (i, cands) in self.candidates.iter().enumerate() {
            // A single candidate is either the only match or the policy does
            // not skip nulls; either way its value is taken as is.
            for &(stream, pos) in cands {
                let value = slot(rows[stream], stream, pos)?;
                if !value.is_null() || cands.len() == 1 {
                    out[i] = value.clone();
                    break;
                }
            }
        }
        Ok(out)
    }
}

fn check_arity(rows: usize, schemas: usize) -> Result<()> {
    if rows != schemas {
        return Err(OpError::Plan(format!(
            "reconcile given {rows} rows but {schemas} schemas"
        )));
    }
    Ok(())
}

fn scan_order(policy: SelectionPolicy, n: usize) -> impl Iterator<Item = usize> {
    let backward = policy.scans_backward();
    (0..n).map(move |k| if backward { n - 1 - k } else { k })
}

fn slot(row: &Row, stream: usize, pos: usize) -> Result<&Value> {
    row.get(pos).ok_or_else(|| {
        OpError::Exec(format!(
            "schema of input {stream} places a field at {pos} but the row has {} slots",
            row.capacity()
        ))
    })
}
