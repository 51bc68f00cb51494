//! In-memory task repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a monotonically increasing counter starting
/// at 1 and are never reused, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Returns tasks newest first, breaking timestamp ties by descending id.
fn newest_first<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut sorted: Vec<Task> = tasks.cloned().collect();
    sorted.sort_by_key(|task| Reverse((task.created_at(), task.id())));
    sorted
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| {
                TaskRepositoryError::persistence(std::io::Error::other("task id sequence exhausted"))
            })?;
        let id = TaskId::new(next_id).map_err(TaskRepositoryError::persistence)?;
        let created = task.clone().into_task(id);
        state.last_id = next_id;
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_recent_incomplete(&self, limit: usize) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut recent = newest_first(state.tasks.values().filter(|task| !task.is_completed()));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(newest_first(state.tasks.values()))
    }

    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.apply_changes(TaskChanges {
            title: Some(task.title().clone()),
            description: Some(task.description().clone()),
        });
        Ok(())
    }

    async fn mark_completed(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(stored) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        if stored.complete().is_err() {
            return Ok(None);
        }
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
