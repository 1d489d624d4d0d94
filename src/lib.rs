#![forbid(unsafe_code)]
//! rowfuse: row buffers, schema merging, and multi-input row reconciliation.
//!
//! Umbrella crate re-exporting the workspace members; the integration suite
//! lives under `tests/`.

pub use rowfuse_core;
pub use rowfuse_operators;
