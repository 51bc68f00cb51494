//! Domain model for task tracking.
//!
//! The task domain models validated task values and the one-way completion
//! transition while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
