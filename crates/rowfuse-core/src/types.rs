//! Value and row placeholders that flow between pipeline stages.
//!
//! `Value` is deliberately shallow: the core only ever asks whether a value is
//! null. Coercion, ordering, and formatting belong to the type system layered
//! on top.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// A fixed run of value slots.
///
/// The slot count is the row's physical capacity. How many leading slots are
/// meaningful is tracked by the caller (usually from the row's schema), so
/// trailing slots past that point are always `Value::Null` filler from
/// over-allocation and must not be read as data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    slots: Vec<Value>,
}

impl Row {
    /// A row of `slots` null values.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots: vec![Value::Null; slots],
        }
    }

    /// Physical slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Pointer to the backing allocation. Rows without slots all report the
    /// same dangling pointer; use [`Row::shares_storage`] to test aliasing.
    pub fn as_ptr(&self) -> *const Value {
        self.slots.as_ptr()
    }

    /// Whether both rows are backed by the same allocation, e.g. to check that
    /// `resize` kept a row in place. Rows without slots never share storage.
    pub fn shares_storage(&self, other: &Row) -> bool {
        !self.slots.is_empty()
            && !other.slots.is_empty()
            && std::ptr::eq(self.slots.as_ptr(), other.slots.as_ptr())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.slots
    }
}

impl From<Vec<Value>> for Row {
    fn from(slots: Vec<Value>) -> Self {
        Self { slots }
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Deref for Row {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.slots
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.slots
    }
}
