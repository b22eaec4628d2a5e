//! First-Improvement execution loop.
//!
//! # Algorithm
//!
//! ```text
//! loop:
//!   for source in machines:
//!     for task in source.tasks:
//!       for target in machines, target != source:
//!         if target.load + task.time < source.load:
//!           relocate(task, source -> target); continue loop
//!   break
//! ```
//!
//! Every accepted move strictly lowers `Σ load²`, which bounds the number of
//! moves, so the loop always terminates.

use super::config::FirstImprovementConfig;
use crate::model::Assignment;

/// Result of a First-Improvement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstImprovementResult {
    /// Relocations applied.
    pub moves: usize,
    /// Scans started, including the final move-free one.
    pub passes: usize,
    /// Whether the run stopped on `max_moves` instead of converging.
    pub capped: bool,
}

/// Runs First-Improvement local search in place.
pub struct FirstImprovementRunner;

impl FirstImprovementRunner {
    /// Improves `assignment` until no accepted move remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_balance::first::{FirstImprovementConfig, FirstImprovementRunner};
    /// use u_balance::model::{Assignment, Task};
    ///
    /// let tasks = (0..4).map(|i| Task::new(i, 10)).collect();
    /// let mut a = Assignment::all_on_first(tasks, 2).unwrap();
    /// let result = FirstImprovementRunner::run(&mut a, &FirstImprovementConfig::default());
    /// assert_eq!(a.loads(), vec![20, 20]);
    /// assert_eq!(result.moves, 2);
    /// ```
    #[tracing::instrument(
        level = "debug",
        name = "first_improvement",
        skip_all,
        fields(machines = assignment.machine_count(), tasks = assignment.task_count())
    )]
    pub fn run(
        assignment: &mut Assignment,
        config: &FirstImprovementConfig,
    ) -> FirstImprovementResult {
        let mut result = FirstImprovementResult::default();

        loop {
            if config.max_moves.is_some_and(|cap| result.moves >= cap) {
                result.capped = true;
                break;
            }
            result.passes += 1;

            match find_first_move(assignment) {
                Some((from, index, to)) => {
                    assignment.move_task(from, index, to);
                    result.moves += 1;
                }
                None => break,
            }
        }

        tracing::debug!(
            moves = result.moves,
            passes = result.passes,
            capped = result.capped,
            makespan = crate::objective::makespan(assignment),
            "first-improvement finished"
        );
        result
    }
}

/// First `(source, task position, target)` in scan order whose target would
/// end up strictly below the source's current load.
fn find_first_move(assignment: &Assignment) -> Option<(usize, usize, usize)> {
    let machines = assignment.machines();

    for (from, source) in machines.iter().enumerate() {
        // Lightest other machine: if even it cannot take a task, nothing can.
        let lightest = machines
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != from)
            .map(|(_, m)| m.load())
            .min()?;

        for (index, task) in source.tasks().iter().enumerate() {
            let p = task.processing_time();
            if lightest + p >= source.load() {
                continue;
            }
            let target = machines
                .iter()
                .enumerate()
                .position(|(to, m)| to != from && m.load() + p < source.load());
            if let Some(to) = target {
                return Some((from, index, to));
            }
        }
    }
    None
}
