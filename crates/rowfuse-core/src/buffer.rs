//! Row buffer allocation and slot surgery.
//!
//! Every row produced in the pipeline is allocated here. Growth always adds a
//! fixed slack on top of the requested size, so a stage that appends fields one
//! at a time only pays for a copy once every `slack` appends instead of on each
//! one.
//!
//! Callers track how many leading slots of a row are occupied; the buffer only
//! knows the physical slot count. Operations that grow take the row by value
//! and either hand it straight back (enough room) or copy into a fresh buffer.
//! Operations that always produce a new buffer borrow.

use crate::error::{Error, Result};
use crate::types::{Row, Value};

/// Extra slots added on every allocation and growth.
pub const OVER_ALLOCATE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBuffer {
    slack: usize,
}

impl Default for RowBuffer {
    fn default() -> Self {
        Self::new(OVER_ALLOCATE_SIZE)
    }
}

impl RowBuffer {
    pub fn new(slack: usize) -> Self {
        Self { slack }
    }

    pub fn slack(&self) -> usize {
        self.slack
    }

    /// A fresh row with room for `size` fields plus slack, all null.
    pub fn allocate(&self, size: usize) -> Row {
        Row::with_slots(size + self.slack)
    }

    /// Make sure `row` has at least `new_size` slots.
    ///
    /// Returns the very same row (same backing allocation) when it is already
    /// large enough. Otherwise the occupied slots are copied into a new buffer
    /// of `new_size + slack` slots. A missing row yields a fresh allocation.
    pub fn resize(&self, row: Option<Row>, new_size: usize) -> Row {
        match row {
            Some(row) if row.capacity() >= new_size => row,
            Some(row) => self.grow(&row, new_size),
            None => self.allocate(new_size),
        }
    }

    /// Like [`RowBuffer::resize`], but never hands back the input buffer.
    ///
    /// When the row is already large enough the copy keeps its exact slot
    /// count and gets no slack.
    pub fn create_resized_copy(&self, row: Option<&Row>, new_size: usize) -> Row {
        match row {
            Some(row) if row.capacity() >= new_size => row.iter().cloned().collect(),
            Some(row) => self.grow(row, new_size),
            None => self.allocate(new_size),
        }
    }

    /// Concatenate the first `lengths[i]` slots of each `rows[i]` into one new
    /// row, allocated for the total length plus slack.
    pub fn concat_copy(&self, rows: &[&Row], lengths: &[usize]) -> Result<Row> {
        if rows.len() != lengths.len() {
            return Err(Error::Shape(format!(
                "concat given {} rows but {} lengths",
                rows.len(),
                lengths.len()
            )));
        }
        for (i, (row, &len)) in rows.iter().zip(lengths).enumerate() {
            if len > row.capacity() {
                return Err(Error::Shape(format!(
                    "length {len} for row {i} exceeds its {} slots",
                    row.capacity()
                )));
            }
        }

        let total: usize = lengths.iter().sum();
        let mut out = self.allocate(total);
        let mut at = 0;
        for (row, &len) in rows.iter().zip(lengths) {
            out[at..at + len].clone_from_slice(&row[..len]);
            at += len;
        }
        Ok(out)
    }

    /// Copy of `row` with the slot at `index` cut out; exactly one slot shorter.
    ///
    /// This is the slow path. Prefer [`RowBuffer::remove_items`] when more than
    /// one slot goes.
    pub fn remove_item(&self, row: &Row, index: usize) -> Result<Row> {
        if index >= row.capacity() {
            return Err(Error::Shape(format!(
                "remove index {index} out of bounds for row of {} slots",
                row.capacity()
            )));
        }
        let mut slots = Vec::with_capacity(row.capacity() - 1);
        slots.extend_from_slice(&row[..index]);
        slots.extend_from_slice(&row[index + 1..]);
        Ok(Row::from(slots))
    }

    /// Copy of `row` without the slots listed in `indices`, in one pass.
    ///
    /// `indices` must be strictly ascending and in bounds.
    pub fn remove_items(&self, row: &Row, indices: &[usize]) -> Result<Row> {
        for pair in indices.windows(2) {
            if pair[0] >= pair[1] {
                return Err(Error::Shape(format!(
                    "remove indices must be sorted ascending without duplicates, got {} before {}",
                    pair[0], pair[1]
                )));
            }
        }
        if let Some(&last) = indices.last() {
            if last >= row.capacity() {
                return Err(Error::Shape(format!(
                    "remove index {last} out of bounds for row of {} slots",
                    row.capacity()
                )));
            }
        }

        let mut slots = Vec::with_capacity(row.capacity() - indices.len());
        let mut skip = indices.iter().peekable();
        for (i, value) in row.iter().enumerate() {
            if skip.peek() == Some(&&i) {
                skip.next();
                continue;
            }
            slots.push(value.clone());
        }
        Ok(Row::from(slots))
    }

    /// Write `extra` right after the first `occupied` slots of `row`, growing
    /// it if needed. May return `row` itself.
    pub fn append(&self, row: Row, occupied: usize, extra: &[Value]) -> Row {
        let mut out = self.resize(Some(row), occupied + extra.len());
        out[occupied..occupied + extra.len()].clone_from_slice(extra);
        out
    }

    /// Single-value form of [`RowBuffer::append`].
    pub fn append_value(&self, row: Row, occupied: usize, value: Value) -> Row {
        let mut out = self.resize(Some(row), occupied + 1);
        out[occupied] = value;
        out
    }

    /// Insert `value` at `index`, shifting slots `index..occupied` up by one.
    pub fn insert_value(&self, row: Row, occupied: usize, index: usize, value: Value) -> Result<Row> {
        if index > occupied {
            return Err(Error::Shape(format!(
                "insert index {index} out of bounds for {occupied} occupied slots"
            )));
        }
        let mut out = self.resize(Some(row), occupied + 1);
        out[index..=occupied].rotate_right(1);
        out[index] = value;
        Ok(out)
    }

    fn grow(&self, row: &Row, new_size: usize) -> Row {
        #[cfg(feature = "tracing")]
        tracing::trace!(from = row.capacity(), to = new_size + self.slack, "growing row buffer");

        let mut slots = Vec::with_capacity(new_size + self.slack);
        slots.extend_from_slice(row);
        slots.resize(new_size + self.slack, Value::Null);
        Row::from(slots)
    }
}
