//! Heuristic load balancing of atomic jobs on identical machines.
//!
//! Tasks with fixed processing times are assigned to a pool of identical
//! machines; the heuristics relocate tasks one at a time to lower the
//! makespan (largest machine load) or the spread of the loads.
//!
//! - **First-Improvement (FI)**: greedy local search that applies the first
//!   relocation it finds that unloads a machine.
//! - **Best-Improvement (BI)**: local search that applies, each round, the
//!   single relocation with the greatest gain.
//! - **Iterated Local Search (ILS)**: random perturbation followed by
//!   Best-Improvement, keeping only strictly better assignments.
//!
//! The [`experiment`] module generates random instances, runs parameter
//! sweeps and exports CSV results.
//!
//! # Architecture
//!
//! ```text
//! model      Task / Machine / Assignment, atomic relocation
//! objective  makespan, load standard deviation, move deltas
//! first      FI runner          ─┐
//! best       BI runner          ─┼─ experiment (generator, sweep, export)
//! ils        ILS runner (uses BI)┘
//! ```
//!
//! # Features
//!
//! - `parallel`: score Best-Improvement candidates with rayon.
//! - `serde`: derive `Serialize`/`Deserialize` on configs and records.
//! - `cli`: builds the `balance-sweep` binary.

pub mod best;
pub mod error;
pub mod experiment;
pub mod first;
pub mod ils;
pub mod model;
pub mod objective;
pub mod random;

pub use error::{BalanceError, Result};
