//! Training and evaluation pipelines
//!
//! The pipeline plays repeated episodes between an agent and an opponent,
//! aggregates outcomes, and notifies observers for progress reporting.

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{Pipeline, RunConfig, RunSummary};
