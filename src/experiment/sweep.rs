//! Parameter sweeps over machine counts and task/machine ratios.

use std::time::Instant;

use super::export::MetricsRecord;
use super::generator::InstanceGenerator;
use super::strategy::Strategy;
use crate::error::{BalanceError, Result};
use crate::model::Assignment;
use crate::random::rng_from_seed;

/// Grid and repetition settings for [`run_sweep`].
///
/// # Examples
///
/// ```
/// use u_balance::experiment::SweepConfig;
///
/// let config = SweepConfig::default()
///     .with_machine_counts(vec![4, 8])
///     .with_ratios(vec![1.5])
///     .with_replications(3)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.instance_count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Machine counts (M) to test.
    pub machine_counts: Vec<usize>,
    /// Exponents r with N = floor(M^r).
    pub ratios: Vec<f64>,
    /// Replications per (M, r) pair.
    pub replications: usize,
    /// Processing time distribution.
    pub generator: InstanceGenerator,
    /// Random seed for the whole sweep. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            machine_counts: vec![10, 20, 50],
            ratios: vec![1.5, 2.0],
            replications: 10,
            generator: InstanceGenerator::default(),
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Sets the machine counts.
    pub fn with_machine_counts(mut self, counts: Vec<usize>) -> Self {
        self.machine_counts = counts;
        self
    }

    /// Sets the ratios.
    pub fn with_ratios(mut self, ratios: Vec<f64>) -> Self {
        self.ratios = ratios;
        self
    }

    /// Sets the number of replications.
    pub fn with_replications(mut self, n: usize) -> Self {
        self.replications = n;
        self
    }

    /// Sets the processing time distribution.
    pub fn with_generator(mut self, generator: InstanceGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of instances the sweep will run.
    pub fn instance_count(&self) -> usize {
        self.machine_counts.len() * self.ratios.len() * self.replications
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.machine_counts.is_empty() || self.ratios.is_empty() {
            return Err(BalanceError::InvalidConfig(
                "machine_counts and ratios must not be empty".into(),
            ));
        }
        if self.machine_counts.contains(&0) {
            return Err(BalanceError::NoMachines);
        }
        if let Some(r) = self.ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(BalanceError::InvalidConfig(format!(
                "ratios must be positive, got {r}"
            )));
        }
        if self.replications == 0 {
            return Err(BalanceError::InvalidConfig(
                "replications must be at least 1".into(),
            ));
        }
        self.generator.validate()
    }
}

/// Metrics of every sweep instance plus the final assignment of the first.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// One record per (M, r, replication), in sweep order.
    pub records: Vec<MetricsRecord>,
    /// Final assignment of the first instance, for allocation export.
    pub sample: Option<Assignment>,
}

/// Runs `strategy` on every instance of the sweep grid.
///
/// Instances run one after another, so each timing covers a single strategy
/// call with nothing else competing for the CPU.
pub fn run_sweep(config: &SweepConfig, strategy: &Strategy) -> Result<SweepOutcome> {
    config.validate()?;
    strategy.validate()?;

    let mut rng = rng_from_seed(config.seed);
    let mut records = Vec::with_capacity(config.instance_count());
    let mut sample = None;

    for &machines in &config.machine_counts {
        for &ratio in &config.ratios {
            tracing::info!(
                strategy = strategy.name(),
                machines,
                ratio,
                tasks = super::generator::task_count(machines, ratio),
                "running replications"
            );

            for replication in 1..=config.replications {
                let mut assignment = config.generator.instance(machines, ratio, &mut rng)?;

                let start = Instant::now();
                let outcome = strategy.run(&mut assignment, &mut rng)?;
                let elapsed = start.elapsed();

                tracing::info!(
                    strategy = strategy.name(),
                    machines,
                    ratio,
                    replication,
                    moves = outcome.moves,
                    makespan = outcome.makespan,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "replication finished"
                );

                records.push(MetricsRecord {
                    strategy: strategy.name().to_string(),
                    task_count: assignment.task_count(),
                    machine_count: machines,
                    ratio,
                    replication,
                    elapsed,
                    moves: outcome.moves,
                    makespan: outcome.makespan,
                    parameter: strategy.parameter(),
                });
                if sample.is_none() {
                    sample = Some(assignment);
                }
            }
        }
    }

    Ok(SweepOutcome { records, sample })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best::BestImprovementConfig;
    use crate::first::FirstImprovementConfig;
    use crate::ils::IlsConfig;

    fn small() -> SweepConfig {
        SweepConfig::default()
            .with_machine_counts(vec![3, 5])
            .with_ratios(vec![1.5, 2.0])
            .with_replications(2)
            .with_seed(42)
    }

    #[test]
    fn test_default_grid() {
        let config = SweepConfig::default();
        assert_eq!(config.machine_counts, vec![10, 20, 50]);
        assert_eq!(config.ratios, vec![1.5, 2.0]);
        assert_eq!(config.replications, 10);
        assert_eq!(config.instance_count(), 60);
    }

    #[test]
    fn test_sweep_record_count_and_order() {
        let strategy = Strategy::BestImprovement(BestImprovementConfig::default());
        let outcome = run_sweep(&small(), &strategy).unwrap();

        assert_eq!(outcome.records.len(), 8);
        let first = &outcome.records[0];
        assert_eq!(first.machine_count, 3);
        assert_eq!(first.task_count, 5);
        assert_eq!(first.replication, 1);
        let last = &outcome.records[7];
        assert_eq!(last.machine_count, 5);
        assert_eq!(last.task_count, 25);
        assert_eq!(last.replication, 2);
        assert!(outcome.records.iter().all(|r| r.strategy == "best-improvement"));
        assert!(outcome.records.iter().all(|r| r.parameter.is_none()));
    }

    #[test]
    fn test_sweep_sample_is_first_instance() {
        let strategy = Strategy::FirstImprovement(FirstImprovementConfig::default());
        let outcome = run_sweep(&small(), &strategy).unwrap();
        let sample = outcome.sample.unwrap();
        assert_eq!(sample.machine_count(), 3);
        assert_eq!(sample.task_count(), 5);
        assert_eq!(
            crate::objective::makespan(&sample),
            outcome.records[0].makespan
        );
    }

    #[test]
    fn test_sweep_reproducible() {
        let strategy = Strategy::IteratedLocalSearch(
            IlsConfig::default().with_max_non_improving(5),
        );
        let a = run_sweep(&small(), &strategy).unwrap();
        let b = run_sweep(&small(), &strategy).unwrap();
        let key = |o: &SweepOutcome| -> Vec<(usize, u64)> {
            o.records.iter().map(|r| (r.moves, r.makespan)).collect()
        };
        assert_eq!(key(&a), key(&b));
        assert!(a.records.iter().all(|r| r.parameter == Some(0.1)));
    }

    #[test]
    fn test_sweep_validation() {
        let strategy = Strategy::BestImprovement(BestImprovementConfig::default());
        assert!(run_sweep(&small().with_replications(0), &strategy).is_err());
        assert!(run_sweep(&small().with_ratios(vec![]), &strategy).is_err());
        assert!(run_sweep(&small().with_ratios(vec![-1.0]), &strategy).is_err());
        assert!(matches!(
            run_sweep(&small().with_machine_counts(vec![0]), &strategy),
            Err(BalanceError::NoMachines)
        ));
    }
}
