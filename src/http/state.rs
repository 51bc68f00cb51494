//! Shared handler state.

use std::sync::Arc;

use mockable::Clock;

use crate::task::{ports::TaskRepository, services::TaskService};

/// State injected into every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<R, C>,
    clock: Arc<C>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wires the task service around the given repository and clock.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            tasks: TaskService::new(repository, Arc::clone(&clock)),
            clock,
        }
    }

    /// Task service used by the task handlers.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<R, C> {
        &self.tasks
    }

    /// Clock shared with the task service.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
