//! Error type shared by the model, configuration and experiment layers.

use thiserror::Error;

use crate::model::TaskId;

/// Errors raised while building instances, validating configurations or
/// exporting results.
///
/// The search strategies themselves are infallible: every precondition they
/// rely on (at least one machine, positive processing times) is enforced when
/// the [`Assignment`](crate::model::Assignment) is constructed.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// An assignment needs at least one machine.
    #[error("an assignment requires at least one machine")]
    NoMachines,

    /// A task has a zero processing time.
    #[error("task {task} has a non-positive processing time")]
    InvalidProcessingTime {
        /// Offending task.
        task: TaskId,
    },

    /// The same task id appears more than once in an instance.
    #[error("task {task} appears more than once")]
    DuplicateTask {
        /// Duplicated task.
        task: TaskId,
    },

    /// A machine index does not exist.
    #[error("machine index {index} out of range ({machines} machines)")]
    MachineOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of machines in the assignment.
        machines: usize,
    },

    /// A task position does not exist on the given machine.
    #[error("task position {index} out of range on machine {machine} ({tasks} tasks)")]
    TaskOutOfRange {
        /// Machine index.
        machine: usize,
        /// Requested task position.
        index: usize,
        /// Number of tasks on that machine.
        tasks: usize,
    },

    /// A relocation whose source and target are the same machine.
    #[error("cannot relocate a task from machine {index} onto itself")]
    SameMachine {
        /// Machine index.
        index: usize,
    },

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing an export failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BalanceError>;
