pub use crate::buffer::{RowBuffer, OVER_ALLOCATE_SIZE};
pub use crate::config::{DuplicatePolicy, FuseConfig, MissingFieldPolicy, SelectionPolicy};
pub use crate::error::{Error, Result};
pub use crate::schema::{DataType, Field, Schema, SharedSchema};
pub use crate::types::{Row, Value};
