//! Best-Improvement execution loop.
//!
//! # Algorithm
//!
//! ```text
//! loop:
//!   best = none
//!   for (source, task, target) in scan order, source != target:
//!     gain = objective(current) - objective(after move)
//!     if gain > best.gain: best = (source, task, target)
//!   if best is none: break
//!   relocate(best)
//! ```
//!
//! Scoring works on the cached loads only. For a fixed source and task the
//! gain of both policies falls as the target load rises, so the best target
//! is the lightest other machine, lowest index first. That is also the first
//! maximum in scan order, so each round needs one pass over the tasks rather
//! than one per target.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{BestImprovementConfig, MovePolicy};
use crate::model::{Assignment, Machine};
use crate::objective::square_delta;

/// Result of a Best-Improvement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestImprovementResult {
    /// Relocations applied.
    pub moves: usize,
    /// Rounds evaluated, including the final one without a move.
    pub rounds: usize,
    /// Whether the run stopped on `max_rounds` instead of converging.
    pub capped: bool,
}

/// A scored relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    from: usize,
    index: usize,
    to: usize,
    gain: i128,
}

/// Runs Best-Improvement local search in place.
pub struct BestImprovementRunner;

impl BestImprovementRunner {
    /// Improves `assignment` until no relocation has a positive gain.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_balance::best::{BestImprovementConfig, BestImprovementRunner};
    /// use u_balance::model::{Assignment, Task};
    ///
    /// let tasks = (0..4).map(|i| Task::new(i, 10)).collect();
    /// let mut a = Assignment::all_on_first(tasks, 3).unwrap();
    /// let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
    /// assert_eq!(a.loads(), vec![20, 10, 10]);
    /// assert_eq!(result.moves, 2);
    /// ```
    #[tracing::instrument(
        level = "debug",
        name = "best_improvement",
        skip_all,
        fields(machines = assignment.machine_count(), tasks = assignment.task_count())
    )]
    pub fn run(
        assignment: &mut Assignment,
        config: &BestImprovementConfig,
    ) -> BestImprovementResult {
        let mut result = BestImprovementResult::default();

        loop {
            if config.max_rounds.is_some_and(|cap| result.rounds >= cap) {
                result.capped = true;
                break;
            }
            result.rounds += 1;

            match best_move(assignment, config) {
                Some(c) => {
                    assignment.move_task(c.from, c.index, c.to);
                    result.moves += 1;
                }
                None => break,
            }
        }

        tracing::debug!(
            moves = result.moves,
            rounds = result.rounds,
            capped = result.capped,
            makespan = crate::objective::makespan(assignment),
            "best-improvement finished"
        );
        result
    }
}

/// Highest-gain admissible move of the round, first in scan order on ties.
fn best_move(assignment: &Assignment, config: &BestImprovementConfig) -> Option<Candidate> {
    let machines = assignment.machines();
    if machines.len() < 2 {
        return None;
    }

    match config.policy {
        MovePolicy::GlobalDispersion => {
            let per_source = score_sources(machines, config.parallel);
            pick_first_best(per_source)
        }
        MovePolicy::MaxLoadTargeted { longest_task_only } => {
            let from = most_loaded(machines);
            let source = &machines[from];
            let to = lightest_other(machines, from)?;
            let target_load = machines[to].load();
            let gain = |p: u64| makespan_gain(source.load(), target_load, p);

            if longest_task_only {
                let index = source.longest_task()?;
                let p = source.tasks()[index].processing_time();
                return Some(Candidate {
                    from,
                    index,
                    to,
                    gain: gain(p),
                })
                .filter(|c| c.gain > 0);
            }
            best_task_on(source, from, to, gain)
        }
    }
}

/// Best dispersion-reducing move of every source machine, in index order.
fn score_sources(machines: &[Machine], parallel: bool) -> Vec<Option<Candidate>> {
    let score = |from: usize| {
        let source = &machines[from];
        if source.is_empty() {
            return None;
        }
        let to = lightest_other(machines, from)?;
        let target_load = machines[to].load();
        best_task_on(source, from, to, |p| {
            -square_delta(source.load(), target_load, p)
        })
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..machines.len()).into_par_iter().map(score).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..machines.len()).map(score).collect()
}

/// First task of `source` with the strictly largest positive gain.
fn best_task_on(
    source: &Machine,
    from: usize,
    to: usize,
    gain: impl Fn(u64) -> i128,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (index, task) in source.tasks().iter().enumerate() {
        let g = gain(task.processing_time());
        if g > best.map_or(0, |c| c.gain) {
            best = Some(Candidate {
                from,
                index,
                to,
                gain: g,
            });
        }
    }
    best
}

/// Sequential reduction keeping the earliest candidate on equal gains.
fn pick_first_best(candidates: Vec<Option<Candidate>>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates.into_iter().flatten() {
        if c.gain > best.map_or(0, |b| b.gain) {
            best = Some(c);
        }
    }
    best
}

/// Reduction of the source's load below its current (maximum) value.
fn makespan_gain(source_load: u64, target_load: u64, p: u64) -> i128 {
    let after = (source_load - p).max(target_load + p);
    source_load as i128 - after as i128
}

/// Index of the most-loaded machine, lowest index on ties.
fn most_loaded(machines: &[Machine]) -> usize {
    let mut best = 0;
    for (i, m) in machines.iter().enumerate() {
        if m.load() > machines[best].load() {
            best = i;
        }
    }
    best
}

/// Index of the least-loaded machine other than `from`, lowest index on ties.
fn lightest_other(machines: &[Machine], from: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, m) in machines.iter().enumerate() {
        if i == from {
            continue;
        }
        if best.is_none_or(|b| m.load() < machines[b].load()) {
            best = Some(i);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crate::objective::{load_std_dev, makespan, LoadStats};

    fn uniform(count: u32, p: u64, machines: usize) -> Assignment {
        let tasks = (0..count).map(|i| Task::new(i, p)).collect();
        Assignment::all_on_first(tasks, machines).unwrap()
    }

    fn from_times(times: &[u64], machines: usize) -> Assignment {
        let tasks = times
            .iter()
            .enumerate()
            .map(|(i, &p)| Task::new(i as u32, p))
            .collect();
        Assignment::all_on_first(tasks, machines).unwrap()
    }

    fn targeted(longest_task_only: bool) -> BestImprovementConfig {
        BestImprovementConfig::default().with_policy(MovePolicy::MaxLoadTargeted { longest_task_only })
    }

    #[test]
    fn test_four_equal_tasks_three_machines() {
        let mut a = uniform(4, 10, 3);
        let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());

        assert_eq!(a.loads(), vec![20, 10, 10]);
        assert_eq!(makespan(&a), 20);
        assert_eq!(result.moves, 2);
        assert_eq!(result.rounds, 3);
    }

    #[test]
    fn test_ties_go_to_first_target() {
        // From [40,0,0] both empty machines tie; the first one wins.
        let mut a = uniform(4, 10, 3);
        let config = BestImprovementConfig::default().with_max_rounds(1);
        BestImprovementRunner::run(&mut a, &config);
        assert_eq!(a.loads(), vec![30, 10, 0]);
        assert_eq!(a.machines()[1].tasks()[0].id(), crate::model::TaskId(0));
    }

    #[test]
    fn test_prefers_largest_dispersion_reduction() {
        // [11,0]: moving 5 gives [6,5]; moving 1 gives [10,1]; 5 wins.
        let mut a = from_times(&[1, 5, 5], 2);
        let config = BestImprovementConfig::default().with_max_rounds(1);
        BestImprovementRunner::run(&mut a, &config);
        assert_eq!(a.loads(), vec![6, 5]);
    }

    #[test]
    fn test_dispersion_strictly_decreases_each_move() {
        let mut a = from_times(&[7, 3, 9, 12, 5, 5, 8, 1, 4, 10], 4);
        let config = BestImprovementConfig::default().with_max_rounds(1);
        let mut previous = LoadStats::of(&a).sum_of_squares;
        loop {
            let result = BestImprovementRunner::run(&mut a, &config);
            if result.moves == 0 {
                break;
            }
            let current = LoadStats::of(&a).sum_of_squares;
            assert!(current < previous, "{current} !< {previous}");
            previous = current;
        }
        assert!(load_std_dev(&a) < LoadStats::from_loads([64, 0, 0, 0]).std_dev());
    }

    #[test]
    fn test_converged_has_no_improving_move() {
        let mut a = from_times(&[7, 3, 9, 12, 5, 5, 8, 1, 4, 10], 3);
        BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());

        let loads = a.loads();
        for (from, m) in a.machines().iter().enumerate() {
            for task in m.tasks() {
                for (to, &t) in loads.iter().enumerate() {
                    if to != from {
                        assert!(square_delta(loads[from], t, task.processing_time()) >= 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent_after_convergence() {
        let mut a = from_times(&[7, 3, 9, 12, 5, 5, 8, 1, 4, 10], 3);
        BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
        let again = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
        assert_eq!(again.moves, 0);
        assert_eq!(again.rounds, 1);
    }

    #[test]
    fn test_single_machine_no_moves() {
        let mut a = uniform(6, 3, 1);
        let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
        assert_eq!(result.moves, 0);
        let result = BestImprovementRunner::run(&mut a, &targeted(false));
        assert_eq!(result.moves, 0);
    }

    #[test]
    fn test_empty_instance_no_moves() {
        let mut a = uniform(0, 1, 3);
        let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
        assert_eq!(result.moves, 0);
        let result = BestImprovementRunner::run(&mut a, &targeted(true));
        assert_eq!(result.moves, 0);
    }

    #[test]
    fn test_single_task_never_moves() {
        let mut a = uniform(1, 8, 3);
        let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default());
        assert_eq!(result.moves, 0);
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_targeted_moves_only_from_max_machine() {
        let groups = vec![
            vec![Task::new(0, 4), Task::new(1, 6)],
            vec![Task::new(2, 20)],
            vec![],
        ];
        let mut a = Assignment::from_machines(groups).unwrap();
        let config = targeted(false).with_max_rounds(1);
        BestImprovementRunner::run(&mut a, &config);
        // Machine 1 is the only source; 20 onto 0 gives max(0, 20) = no gain.
        assert_eq!(a.loads(), vec![10, 20, 0]);
        assert_eq!(a.move_count(), 0);
    }

    #[test]
    fn test_targeted_longest_task_only() {
        // [3, 9] on m0; lightest target m1 = 0. Longest (9): max(3, 9) = 9,
        // gain 3. All tasks: 3 gives max(9, 3) = 9, gain 3 too; first wins.
        let mut all = from_times(&[3, 9], 2);
        BestImprovementRunner::run(&mut all, &targeted(false).with_max_rounds(1));
        assert_eq!(all.loads(), vec![9, 3]);

        let mut longest = from_times(&[3, 9], 2);
        BestImprovementRunner::run(&mut longest, &targeted(true).with_max_rounds(1));
        assert_eq!(longest.loads(), vec![3, 9]);
    }

    #[test]
    fn test_targeted_reaches_balance() {
        let mut a = uniform(12, 5, 4);
        let result = BestImprovementRunner::run(&mut a, &targeted(false));
        assert_eq!(makespan(&a), 15);
        assert_eq!(a.task_count(), 12);
        assert!(result.moves >= 9);
    }

    #[test]
    fn test_targeted_makespan_non_increasing() {
        let mut a = from_times(&[7, 3, 9, 12, 5, 5, 8, 1, 4, 10], 3);
        let config = targeted(true).with_max_rounds(1);
        let mut previous = makespan(&a);
        while BestImprovementRunner::run(&mut a, &config).moves > 0 {
            let current = makespan(&a);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_round_cap() {
        let mut a = uniform(30, 2, 5);
        let result = BestImprovementRunner::run(&mut a, &BestImprovementConfig::default().with_max_rounds(4));
        assert!(result.capped);
        assert_eq!(result.rounds, 4);
        assert_eq!(result.moves, 4);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let times = [7, 3, 9, 12, 5, 5, 8, 1, 4, 10, 2, 6, 11, 13];
        let mut seq = from_times(&times, 4);
        let mut par = from_times(&times, 4);
        BestImprovementRunner::run(&mut seq, &BestImprovementConfig::default());
        BestImprovementRunner::run(&mut par, &BestImprovementConfig::default().with_parallel(true));
        assert_eq!(seq, par);
    }
}
