//! Row schemas: ordered field descriptors with a name index.
//!
//! A schema is built once while the pipeline graph is wired and is read-only
//! while rows flow. Fields are only ever appended, never reordered or removed,
//! so positions handed out by `index_of` stay valid for the schema's lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    Binary,
    Date64,
    Decimal128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    /// Name of the stage that contributed this field, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct Schema {
    fields: Vec<Field>,
    // Position of the first field carrying each name.
    index: HashMap<String, usize>,
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Schema {}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        let mut schema = Self {
            fields: Vec::with_capacity(fields.len()),
            index: HashMap::with_capacity(fields.len()),
        };
        for f in fields {
            schema.push(f);
        }
        schema
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Append a field. A repeated name is kept but `index_of` keeps resolving
    /// to the earlier field.
    pub fn push(&mut self, field: Field) {
        let pos = self.fields.len();
        self.index.entry(field.name.clone()).or_insert(pos);
        self.fields.push(field);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl From<Vec<Field>> for Schema {
    fn from(fields: Vec<Field>) -> Self {
        Schema::new(fields)
    }
}

impl From<Schema> for Vec<Field> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

/// A schema that several upstream connections contribute to during setup
/// while workers may already be reading it.
///
/// Writers go through [`SharedSchema::write`] and hold the lock for a whole
/// merge. Row-time readers should take a [`SharedSchema::snapshot`] once setup
/// is finished and look up positions without locking.
#[derive(Debug, Clone, Default)]
pub struct SharedSchema {
    inner: Arc<RwLock<Schema>>,
}

impl SharedSchema {
    pub fn new(schema: Schema) -> Self {
        Self {
            inner: Arc::new(RwLock::new(schema)),
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.read().index_of(name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> Schema {
        self.inner.read().clone()
    }

    /// Run `f` with exclusive access to the schema.
    pub fn write<R>(&self, f: impl FnOnce(&mut Schema) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}
