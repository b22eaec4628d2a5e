//! First-Improvement local search.
//!
//! Scans machines, their tasks, and the other machines in index order and
//! applies the first relocation that leaves the target lighter than the
//! source was. After every accepted move the scan restarts from the first
//! machine; a complete pass without a move ends the search.
//!
//! The acceptance test only compares the two machines involved, never the
//! global makespan, so the search can settle above the best makespan a
//! single move could reach.

mod config;
mod runner;

pub use config::FirstImprovementConfig;
pub use runner::{FirstImprovementResult, FirstImprovementRunner};
