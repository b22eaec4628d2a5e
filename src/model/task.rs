//! Atomic, indivisible jobs.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque task identity, assigned when the instance is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A job with a fixed processing cost.
///
/// Tasks are immutable once created. All machines run at unit rate, so the
/// processing time is also the load the task contributes to its machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    id: TaskId,
    processing_time: u64,
}

impl Task {
    /// Creates a task. Positivity of `processing_time` is checked when the
    /// task is placed into an [`Assignment`](super::Assignment).
    pub fn new(id: u32, processing_time: u64) -> Self {
        Self {
            id: TaskId(id),
            processing_time,
        }
    }

    /// Task identity.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Processing time (load contribution).
    pub fn processing_time(&self) -> u64 {
        self.processing_time
    }
}
