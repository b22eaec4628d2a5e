//! Best-Improvement local search.
//!
//! Each round evaluates every admissible single-task relocation, applies
//! the one with the strictly largest improvement (the first in scan order
//! on ties), and starts the next round from scratch. The search stops when
//! no relocation improves the objective.
//!
//! Two move policies are available (see [`MovePolicy`]):
//!
//! - **Global dispersion** (default): any task on any machine may move;
//!   moves are ranked by how much they lower the standard deviation of the
//!   loads.
//! - **Max-load targeted**: only tasks on the most-loaded machine may move
//!   (optionally only its longest task); moves are ranked by how much they
//!   lower that machine's share of the makespan.
//!
//! Candidate moves are scored from the current loads without mutating the
//! assignment, so evaluation can run in parallel with the `parallel`
//! feature and gives the same result as the sequential scan.

mod config;
mod runner;

pub use config::{BestImprovementConfig, MovePolicy};
pub use runner::{BestImprovementResult, BestImprovementRunner};
