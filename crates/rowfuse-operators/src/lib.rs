#![forbid(unsafe_code)]
//! rowfuse-operators: schema merging and row reconciliation for stages with
//! several input streams.
//!
//! Design intent:
//! - Keep this crate pure and synchronous (no async).
//! - Schema work happens once at setup; the per-row path does no name lookups
//!   once a reconciler is bound.

pub mod merge;
pub mod multi_merge;
pub mod reconcile;
pub mod traits;

pub use merge::{MergeReport, SchemaMerger};
pub use multi_merge::MultiMerge;
pub use reconcile::{BoundReconciler, RowReconciler};
pub use rowfuse_core::config::{DuplicatePolicy, MissingFieldPolicy, SelectionPolicy};
pub use traits::OpError;
