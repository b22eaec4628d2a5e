//! ILS execution loop.
//!
//! # Algorithm
//!
//! 1. `S` = initial assignment (optionally improved by Best-Improvement)
//! 2. `best = makespan(S)`
//! 3. Repeat:
//!    a. `S'` = perturb(copy of `S`)
//!    b. Best-Improvement on `S'` until convergence
//!    c. If `makespan(S') < best`: `S = S'`, `best = makespan(S')`
//! 4. Stop once `iteration − last_improvement ≥ max_non_improving`

use rand::Rng;

use super::config::IlsConfig;
use super::perturb::{perturb, perturbation_count};
use crate::best::BestImprovementRunner;
use crate::error::Result;
use crate::model::Assignment;
use crate::objective::makespan;
use crate::random::rng_from_seed;

/// Result of an ILS run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    /// Best assignment found.
    pub best: Assignment,
    /// Makespan of the best assignment.
    pub best_makespan: u64,
    /// Iterations (perturb + local search) executed.
    pub iterations: usize,
    /// Iteration at which the best assignment was found (0 = initial).
    pub best_iteration: usize,
    /// Relocations performed across all iterations, accepted or not.
    pub total_moves: usize,
    /// Best makespan after each iteration.
    pub makespan_history: Vec<u64>,
}

/// Iterated Local Search runner.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs ILS from `initial`, which is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_balance::ils::{IlsConfig, IlsRunner};
    /// use u_balance::model::{Assignment, Task};
    ///
    /// let tasks = (0..12).map(|i| Task::new(i, 1 + u64::from(i % 5))).collect();
    /// let initial = Assignment::all_on_first(tasks, 3).unwrap();
    /// let config = IlsConfig::default().with_max_non_improving(20).with_seed(7);
    ///
    /// let result = IlsRunner::run(&initial, &config).unwrap();
    /// assert!(result.best_makespan < 33);
    /// ```
    pub fn run(initial: &Assignment, config: &IlsConfig) -> Result<IlsResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(initial, config, &mut rng)
    }

    /// Runs ILS drawing randomness from the given generator instead of
    /// `config.seed`.
    #[tracing::instrument(
        level = "debug",
        name = "ils",
        skip_all,
        fields(
            machines = initial.machine_count(),
            tasks = initial.task_count(),
            rate = config.perturbation_rate
        )
    )]
    pub fn run_with_rng<R: Rng>(
        initial: &Assignment,
        config: &IlsConfig,
        rng: &mut R,
    ) -> Result<IlsResult> {
        config.validate()?;

        let mut current = initial.clone();
        let mut total_moves = 0;
        if config.optimize_initial {
            total_moves += BestImprovementRunner::run(&mut current, &config.local_search).moves;
        }

        let mut best_makespan = makespan(&current);
        let perturbations = perturbation_count(current.task_count(), config.perturbation_rate);

        let mut iteration = 0;
        let mut best_iteration = 0;
        let mut makespan_history = Vec::new();

        // No relocation exists, so every iteration would be a no-op.
        if current.task_count() == 0 || current.machine_count() < 2 {
            tracing::debug!(best_makespan, "ils skipped: nothing to relocate");
            return Ok(IlsResult {
                best: current,
                best_makespan,
                iterations: 0,
                best_iteration: 0,
                total_moves,
                makespan_history,
            });
        }

        while iteration - best_iteration < config.max_non_improving {
            if config.max_iterations > 0 && iteration >= config.max_iterations {
                break;
            }
            iteration += 1;

            let mut candidate = current.clone();
            total_moves += perturb(&mut candidate, config.perturbation_rate, rng);
            total_moves += BestImprovementRunner::run(&mut candidate, &config.local_search).moves;
            let candidate_makespan = makespan(&candidate);

            let improved = candidate_makespan < best_makespan;
            if improved {
                tracing::debug!(
                    iteration,
                    from = best_makespan,
                    to = candidate_makespan,
                    "ils improvement"
                );
                current = candidate;
                best_makespan = candidate_makespan;
                best_iteration = iteration;
            }
            makespan_history.push(best_makespan);

            // Without perturbation every later iteration repeats this one.
            if perturbations == 0 && !improved {
                break;
            }
        }

        tracing::debug!(
            iterations = iteration,
            best_iteration,
            best_makespan,
            total_moves,
            "ils finished"
        );

        Ok(IlsResult {
            best: current,
            best_makespan,
            iterations: iteration,
            best_iteration,
            total_moves,
            makespan_history,
        })
    }
}
