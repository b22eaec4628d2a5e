//! The mapping of every task to exactly one machine.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::machine::Machine;
use super::task::{Task, TaskId};
use crate::error::{BalanceError, Result};

/// Tasks distributed over an ordered pool of identical machines.
///
/// # Invariants
///
/// - There is at least one machine.
/// - Every task of the instance sits on exactly one machine.
/// - Each machine's cached load equals the sum of its tasks.
///
/// All mutation goes through [`relocate`](Self::relocate), which removes a
/// task from its source, appends it to the target and updates both loads.
///
/// # Examples
///
/// ```
/// use u_balance::model::{Assignment, Task};
///
/// let tasks = vec![Task::new(0, 4), Task::new(1, 6)];
/// let mut a = Assignment::all_on_first(tasks, 2).unwrap();
/// assert_eq!(a.loads(), vec![10, 0]);
///
/// a.relocate(0, 1, 1).unwrap();
/// assert_eq!(a.loads(), vec![4, 6]);
/// assert_eq!(a.move_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Assignment {
    machines: Vec<Machine>,
    move_count: usize,
}

impl Assignment {
    /// Places every task on machine 0 and leaves the other machines empty.
    ///
    /// This is the worst-case skewed start the heuristics have to repair.
    pub fn all_on_first(tasks: Vec<Task>, machine_count: usize) -> Result<Self> {
        if machine_count == 0 {
            return Err(BalanceError::NoMachines);
        }
        let mut groups = vec![Vec::new(); machine_count];
        groups[0] = tasks;
        Self::from_machines(groups)
    }

    /// Builds an assignment from explicit per-machine task lists.
    pub fn from_machines(groups: Vec<Vec<Task>>) -> Result<Self> {
        if groups.is_empty() {
            return Err(BalanceError::NoMachines);
        }
        let mut seen = HashSet::new();
        for task in groups.iter().flatten() {
            if task.processing_time() == 0 {
                return Err(BalanceError::InvalidProcessingTime { task: task.id() });
            }
            if !seen.insert(task.id()) {
                return Err(BalanceError::DuplicateTask { task: task.id() });
            }
        }
        Ok(Self {
            machines: groups.into_iter().map(Machine::with_tasks).collect(),
            move_count: 0,
        })
    }

    /// Machines in index order.
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Machine at `index`, if it exists.
    pub fn machine(&self, index: usize) -> Option<&Machine> {
        self.machines.get(index)
    }

    /// Number of machines (always at least one).
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Total number of tasks across all machines.
    pub fn task_count(&self) -> usize {
        self.machines.iter().map(Machine::len).sum()
    }

    /// Current machine loads in index order.
    pub fn loads(&self) -> Vec<u64> {
        self.machines.iter().map(Machine::load).collect()
    }

    /// Sum of all loads. Invariant under relocation.
    pub fn total_load(&self) -> u64 {
        self.machines.iter().map(Machine::load).sum()
    }

    /// Sorted ids of every assigned task.
    pub fn task_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self
            .machines
            .iter()
            .flat_map(|m| m.tasks().iter().map(Task::id))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of relocations performed since creation or the last reset.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Resets the relocation counter.
    pub fn reset_move_count(&mut self) {
        self.move_count = 0;
    }

    /// Moves the task at position `index` of machine `from` to the end of
    /// machine `to`, returning the moved task.
    ///
    /// Nothing is changed when an index is invalid or `from == to`.
    pub fn relocate(&mut self, from: usize, index: usize, to: usize) -> Result<Task> {
        let machines = self.machines.len();
        for m in [from, to] {
            if m >= machines {
                return Err(BalanceError::MachineOutOfRange { index: m, machines });
            }
        }
        if from == to {
            return Err(BalanceError::SameMachine { index: from });
        }
        let tasks = self.machines[from].len();
        if index >= tasks {
            return Err(BalanceError::TaskOutOfRange {
                machine: from,
                index,
                tasks,
            });
        }
        Ok(self.move_task(from, index, to))
    }

    /// Unchecked relocation used by the search strategies, which only ever
    /// produce valid indices.
    pub(crate) fn move_task(&mut self, from: usize, index: usize, to: usize) -> Task {
        debug_assert_ne!(from, to);
        let task = self.machines[from].take(index);
        self.machines[to].push(task);
        self.move_count += 1;
        tracing::trace!(
            task = task.id().0,
            from,
            to,
            processing_time = task.processing_time(),
            "relocate"
        );
        task
    }
}
