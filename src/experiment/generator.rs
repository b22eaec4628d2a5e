//! Random instance generation.

use rand::Rng;

use crate::error::{BalanceError, Result};
use crate::model::{Assignment, Task};

/// Number of tasks for `machines` machines at task/machine exponent
/// `ratio`: `floor(machines^ratio)`.
///
/// ```
/// assert_eq!(u_balance::experiment::task_count(10, 1.5), 31);
/// assert_eq!(u_balance::experiment::task_count(20, 2.0), 400);
/// ```
pub fn task_count(machines: usize, ratio: f64) -> usize {
    (machines as f64).powf(ratio) as usize
}

/// Produces tasks with uniform integer processing times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceGenerator {
    /// Smallest processing time (inclusive, at least 1).
    pub min_time: u64,
    /// Largest processing time (inclusive).
    pub max_time: u64,
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self {
            min_time: 1,
            max_time: 100,
        }
    }
}

impl InstanceGenerator {
    /// Creates a generator for times in `[min_time, max_time]`.
    pub fn new(min_time: u64, max_time: u64) -> Self {
        Self { min_time, max_time }
    }

    /// Validates the time range.
    pub fn validate(&self) -> Result<()> {
        if self.min_time == 0 {
            return Err(BalanceError::InvalidConfig(
                "min_time must be positive".into(),
            ));
        }
        if self.min_time > self.max_time {
            return Err(BalanceError::InvalidConfig(format!(
                "min_time {} exceeds max_time {}",
                self.min_time, self.max_time
            )));
        }
        Ok(())
    }

    /// Generates `count` tasks with ids `0..count`.
    ///
    /// Fails when `count` does not fit the `u32` id space.
    pub fn tasks<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<Task>> {
        let count = u32::try_from(count).map_err(|_| {
            BalanceError::InvalidConfig(format!(
                "{count} tasks exceed the task id range (max {})",
                u32::MAX
            ))
        })?;
        Ok((0..count)
            .map(|id| Task::new(id, rng.random_range(self.min_time..=self.max_time)))
            .collect())
    }

    /// Generates `task_count(machines, ratio)` tasks, all on machine 0.
    pub fn instance<R: Rng>(&self, machines: usize, ratio: f64, rng: &mut R) -> Result<Assignment> {
        self.validate()?;
        let tasks = self.tasks(task_count(machines, ratio), rng)?;
        Assignment::all_on_first(tasks, machines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_task_count_grid() {
        assert_eq!(task_count(10, 1.5), 31);
        assert_eq!(task_count(10, 2.0), 100);
        assert_eq!(task_count(50, 1.5), 353);
        assert_eq!(task_count(1, 2.0), 1);
    }

    #[test]
    fn test_tasks_within_range() {
        let generator = InstanceGenerator::default();
        let tasks = generator.tasks(500, &mut create_rng(42)).unwrap();
        assert_eq!(tasks.len(), 500);
        assert!(tasks
            .iter()
            .all(|t| (1..=100).contains(&t.processing_time())));
        assert_eq!(tasks[499].id().0, 499);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_task_count_beyond_id_range() {
        let generator = InstanceGenerator::default();
        let count = u32::MAX as usize + 1;
        assert!(matches!(
            generator.tasks(count, &mut create_rng(1)),
            Err(BalanceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_instance_all_on_first() {
        let generator = InstanceGenerator::new(5, 5);
        let a = generator.instance(10, 1.5, &mut create_rng(1)).unwrap();
        assert_eq!(a.machine_count(), 10);
        assert_eq!(a.task_count(), 31);
        assert_eq!(a.loads()[0], 155);
        assert!(a.loads()[1..].iter().all(|&l| l == 0));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(InstanceGenerator::new(0, 10).validate().is_err());
        assert!(InstanceGenerator::new(10, 5).validate().is_err());
        assert!(InstanceGenerator::new(3, 3).validate().is_ok());
    }

    #[test]
    fn test_zero_machines_instance_fails() {
        let generator = InstanceGenerator::default();
        assert!(matches!(
            generator.instance(0, 1.5, &mut create_rng(1)),
            Err(BalanceError::NoMachines)
        ));
    }
}
