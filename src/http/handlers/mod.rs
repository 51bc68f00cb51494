//! Route handlers.

pub mod health;
pub mod task;

pub use health::health_check;
pub use task::{complete_task, create_task, get_task, list_recent_tasks};
