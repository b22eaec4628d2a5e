//! Experiment harness around the search strategies.
//!
//! - [`InstanceGenerator`]: random task sets and the skewed start
//!   assignment.
//! - [`Strategy`]: uniform entry point over the three heuristics.
//! - [`run_sweep`]: runs a strategy over a grid of machine counts and
//!   task/machine ratios, timing each replication.
//! - [`write_metrics_csv`] / [`write_allocation_csv`]: tabular exports.

mod export;
mod generator;
mod strategy;
mod sweep;

pub use export::{
    allocation_records, write_allocation_csv, write_metrics_csv, AllocationRecord, MetricsRecord,
};
pub use generator::{task_count, InstanceGenerator};
pub use strategy::{RunOutcome, Strategy};
pub use sweep::{run_sweep, SweepConfig, SweepOutcome};
