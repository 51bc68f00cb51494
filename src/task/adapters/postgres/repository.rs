//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskDetailsChangeset, TaskRow},
    schema::task,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskDescription, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Unavailable`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(TaskRepositoryError::unavailable)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Runs a trivial query to confirm the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Unavailable`] when no connection can be
    /// obtained, or [`TaskRepositoryError::Persistence`] when the query fails.
    pub async fn verify_connection(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query("SELECT 1")
                .execute(connection)
                .map_err(map_query_error)?;
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(new_task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(task::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(map_query_error)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = task::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(map_query_error)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_recent_incomplete(&self, limit: usize) -> TaskRepositoryResult<Vec<Task>> {
        let row_limit = i64::try_from(limit).map_err(TaskRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = task::table
                .filter(task::is_completed.eq(false))
                .order((task::created_at.desc(), task::id.desc()))
                .limit(row_limit)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(map_query_error)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = task::table
                .order((task::created_at.desc(), task::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(map_query_error)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_details(&self, updated: &Task) -> TaskRepositoryResult<()> {
        let task_id = updated.id();
        let changeset = TaskDetailsChangeset {
            title: updated.title().as_str().to_owned(),
            description: updated.description().as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            let affected = diesel::update(task::table.find(task_id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(map_query_error)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn mark_completed(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = diesel::update(
                task::table
                    .filter(task::id.eq(id.value()))
                    .filter(task::is_completed.eq(false)),
            )
            .set(task::is_completed.eq(true))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(map_query_error)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(task::table.find(id.value()))
                .execute(connection)
                .map_err(map_query_error)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(new_task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: new_task.title().as_str().to_owned(),
        description: new_task.description().as_str().to_owned(),
        is_completed: false,
        created_at: new_task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        is_completed,
        created_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description: TaskDescription::new(description)
            .map_err(TaskRepositoryError::persistence)?,
        is_completed,
        created_at,
    };
    Ok(Task::from_persisted(data))
}

/// Classifies Diesel errors into repository errors.
///
/// Check and not-null violations are schema validation failures; a closed
/// connection means the store is unreachable.
fn map_query_error(err: DieselError) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            ref info,
        ) => TaskRepositoryError::ConstraintViolation(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TaskRepositoryError::unavailable(err)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}
