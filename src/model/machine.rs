//! A processing unit holding an ordered list of tasks.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::task::Task;

/// A machine and the tasks currently assigned to it.
///
/// `load` is a cache of the sum of the tasks' processing times. Both are
/// private and only change through [`Assignment`](super::Assignment), which
/// updates them together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Machine {
    tasks: Vec<Task>,
    load: u64,
}

impl Machine {
    /// Builds a machine from tasks, computing the load.
    pub(crate) fn with_tasks(tasks: Vec<Task>) -> Self {
        let load = tasks.iter().map(Task::processing_time).sum();
        Self { tasks, load }
    }

    /// Tasks in assignment order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Sum of the processing times of the assigned tasks.
    pub fn load(&self) -> u64 {
        self.load
    }

    /// Number of assigned tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is assigned.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Position of the longest task (first one on ties), if any.
    pub fn longest_task(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, task) in self.tasks.iter().enumerate() {
            let p = task.processing_time();
            if best.is_none_or(|(_, bp)| p > bp) {
                best = Some((i, p));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Removes the task at `index`, keeping the order of the others.
    pub(crate) fn take(&mut self, index: usize) -> Task {
        let task = self.tasks.remove(index);
        self.load -= task.processing_time();
        task
    }

    /// Appends a task at the end.
    pub(crate) fn push(&mut self, task: Task) {
        self.load += task.processing_time();
        self.tasks.push(task);
    }
}
