#![forbid(unsafe_code)]
//! rowfuse-core: shared kernel for the rowfuse engine.
//!
//! This crate contains only *pure* types and small helpers that the operator
//! crate builds on. There is **no I/O** and **no async** here.
//!
//! - `buffer`: row allocation with slack, growth, and slot surgery.
//! - `schema`: ordered, name-indexed field lists and the lock-guarded shared form.
//! - `config`: selection/duplicate/missing-field policies and slack.

pub mod buffer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
