//! Service layer enforcing task business rules.

use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId},
    dto::{CreateTaskDto, UpdateTaskDto},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Number of tasks returned by [`TaskService::get_recent_tasks`].
pub const RECENT_TASK_LIMIT: usize = 5;

/// Service-level errors for task operations.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// Input or business-rule validation failed.
    #[error("{0}")]
    Validation(String),

    /// The referenced task does not exist.
    #[error("Task not found")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl From<TaskDomainError> for TaskServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task from a creation DTO.
    ///
    /// The DTO is validated again here; callers are not trusted to have done
    /// so.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] with the comma-joined
    /// violations when the DTO is invalid or the store rejects the record
    /// against a schema constraint. Other repository failures are returned
    /// unchanged as [`TaskServiceError::Repository`].
    pub async fn create_task(&self, dto: CreateTaskDto) -> TaskServiceResult<Task> {
        let outcome = dto.validate();
        if !outcome.is_valid() {
            return Err(TaskServiceError::Validation(outcome.joined()));
        }

        let (title, description) = dto.into_domain()?;
        let new_task = NewTask::new(title, description, &*self.clock);
        self.repository
            .create(&new_task)
            .await
            .map_err(constraint_violation_as_validation)
    }

    /// Returns the most recently created incomplete tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_recent_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self
            .repository
            .find_recent_incomplete(RECENT_TASK_LIMIT)
            .await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_all_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn get_task_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Marks a task as completed.
    ///
    /// Completing an already-completed task is rejected rather than treated
    /// as a no-op. The write is conditional on the task still being
    /// incomplete, so two concurrent calls cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Validation`] when it is already completed.
    pub async fn complete_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.get_task_by_id(id).await?;
        task.complete()?;

        if let Some(completed) = self.repository.mark_completed(id).await? {
            return Ok(completed);
        }

        // The conditional write missed: tell a concurrent completion apart
        // from a concurrent deletion.
        match self.repository.find_by_id(id).await? {
            Some(_) => Err(TaskDomainError::AlreadyCompleted(id).into()),
            None => Err(TaskServiceError::NotFound(id)),
        }
    }

    /// Updates the title and/or description of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when a provided field breaks
    /// the creation rules and [`TaskServiceError::NotFound`] when the task
    /// does not exist.
    pub async fn update_task(&self, id: TaskId, dto: UpdateTaskDto) -> TaskServiceResult<Task> {
        let outcome = dto.validate();
        if !outcome.is_valid() {
            return Err(TaskServiceError::Validation(outcome.joined()));
        }

        let mut task = self.get_task_by_id(id).await?;
        let changes = dto.into_changes()?;
        if changes.is_empty() {
            return Ok(task);
        }

        task.apply_changes(changes);
        self.repository
            .update_details(&task)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(missing) => TaskServiceError::NotFound(missing),
                other => constraint_violation_as_validation(other),
            })?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskServiceError::NotFound(missing),
            other => TaskServiceError::Repository(other),
        })
    }
}

/// Translates store-side schema rejections into validation failures and
/// passes every other repository error through untouched.
fn constraint_violation_as_validation(err: TaskRepositoryError) -> TaskServiceError {
    match err {
        TaskRepositoryError::ConstraintViolation(message) => TaskServiceError::Validation(message),
        other => TaskServiceError::Repository(other),
    }
}
