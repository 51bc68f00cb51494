//! Application services for task orchestration.

mod task_service;

pub use task_service::{RECENT_TASK_LIMIT, TaskService, TaskServiceError, TaskServiceResult};
