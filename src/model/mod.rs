//! Instance model: tasks, machines and the assignment between them.
//!
//! An [`Assignment`] owns every [`Machine`], and a machine owns its
//! [`Task`]s together with a cached load. The only way to move work between
//! machines is [`Assignment::relocate`], which keeps membership and both
//! cached loads consistent in one step.

mod assignment;
mod machine;
mod task;

pub use assignment::Assignment;
pub use machine::Machine;
pub use task::{Task, TaskId};
