//! One entry point over the three heuristics.

use rand::Rng;

use crate::best::{BestImprovementConfig, BestImprovementRunner, MovePolicy};
use crate::error::Result;
use crate::first::{FirstImprovementConfig, FirstImprovementRunner};
use crate::ils::{IlsConfig, IlsRunner};
use crate::model::Assignment;
use crate::objective::makespan;

/// A configured search strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// First-Improvement local search.
    FirstImprovement(FirstImprovementConfig),
    /// Best-Improvement local search.
    BestImprovement(BestImprovementConfig),
    /// Iterated Local Search over Best-Improvement.
    IteratedLocalSearch(IlsConfig),
}

/// What a strategy reports after one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Relocations performed by the run (for ILS, across all iterations).
    pub moves: usize,
    /// Makespan of the final assignment.
    pub makespan: u64,
}

impl Strategy {
    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FirstImprovement(_) => "first-improvement",
            Strategy::BestImprovement(c) => match c.policy {
                MovePolicy::GlobalDispersion => "best-improvement",
                MovePolicy::MaxLoadTargeted { .. } => "best-improvement-max-load",
            },
            Strategy::IteratedLocalSearch(_) => "iterated-local-search",
        }
    }

    /// Tuning parameter reported alongside the metrics, if any.
    pub fn parameter(&self) -> Option<f64> {
        match self {
            Strategy::IteratedLocalSearch(c) => Some(c.perturbation_rate),
            _ => None,
        }
    }

    /// Validates the embedded configuration.
    pub fn validate(&self) -> Result<()> {
        match self {
            Strategy::IteratedLocalSearch(c) => c.validate(),
            _ => Ok(()),
        }
    }

    /// Runs the strategy on `assignment`, leaving the final assignment in
    /// its place. ILS draws from `rng` instead of its configured seed.
    pub fn run<R: Rng>(&self, assignment: &mut Assignment, rng: &mut R) -> Result<RunOutcome> {
        let moves = match self {
            Strategy::FirstImprovement(c) => FirstImprovementRunner::run(assignment, c).moves,
            Strategy::BestImprovement(c) => BestImprovementRunner::run(assignment, c).moves,
            Strategy::IteratedLocalSearch(c) => {
                let result = IlsRunner::run_with_rng(assignment, c, rng)?;
                *assignment = result.best;
                result.total_moves
            }
        };
        Ok(RunOutcome {
            moves,
            makespan: makespan(assignment),
        })
    }
}
