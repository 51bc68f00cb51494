//! Task endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;
use serde_json::Value;

use crate::error::AppError;
use crate::http::envelope::{
    INVALID_REQUEST_MESSAGE, SuccessEnvelope, TASK_COMPLETED_MESSAGE, TASK_CREATED_MESSAGE,
    TaskBody,
};
use crate::http::state::AppState;
use crate::task::{
    domain::TaskId,
    dto::{CompleteTaskDto, CreateTaskDto},
    ports::TaskRepository,
};

type HandlerResult<T> = Result<T, AppError>;

/// `POST /tasks`: creates a task from `{ "title", "description" }`.
///
/// Absent or non-string fields are treated as empty and fail validation.
///
/// # Errors
///
/// Returns a validation error when the body is not JSON or the fields are
/// invalid.
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<SuccessEnvelope<TaskBody>>)>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected task payload");
        AppError::validation(INVALID_REQUEST_MESSAGE)
    })?;

    let dto = CreateTaskDto::new(string_field(&body, "title"), string_field(&body, "description"));
    let task = state.tasks().create_task(dto).await?;
    tracing::info!(task_id = %task.id(), "task created");

    Ok((
        StatusCode::CREATED,
        Json(SuccessEnvelope::with_message(
            TASK_CREATED_MESSAGE,
            TaskBody::from(&task),
        )),
    ))
}

/// `GET /tasks`: lists the most recent incomplete tasks.
///
/// # Errors
///
/// Returns an error when the store lookup fails.
pub async fn list_recent_tasks<R, C>(
    State(state): State<AppState<R, C>>,
) -> HandlerResult<Json<SuccessEnvelope<Vec<TaskBody>>>>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let tasks = state.tasks().get_recent_tasks().await?;
    Ok(Json(SuccessEnvelope::listing(
        tasks.iter().map(TaskBody::from).collect(),
    )))
}

/// `GET /tasks/{id}`: fetches one task.
///
/// # Errors
///
/// Returns a validation error for a malformed id and not-found when no task
/// has it.
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Json<SuccessEnvelope<TaskBody>>>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(id)?;
    let task = state.tasks().get_task_by_id(task_id).await?;
    Ok(Json(SuccessEnvelope::new(TaskBody::from(&task))))
}

/// `PATCH /tasks/{id}/complete`: marks a task as completed.
///
/// # Errors
///
/// Returns a validation error for a malformed id or an already completed
/// task and not-found when no task has the id.
pub async fn complete_task<R, C>(
    State(state): State<AppState<R, C>>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Json<SuccessEnvelope<TaskBody>>>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(id)?;
    let task = state.tasks().complete_task(task_id).await?;
    tracing::info!(task_id = %task.id(), "task completed");

    Ok(Json(SuccessEnvelope::with_message(
        TASK_COMPLETED_MESSAGE,
        TaskBody::from(&task),
    )))
}

fn string_field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Parses a path id with the same rules as the completion DTO. A path
/// segment that cannot be extracted is treated as empty.
fn parse_task_id(raw: Result<Path<String>, PathRejection>) -> HandlerResult<TaskId> {
    let dto = match raw {
        Ok(Path(value)) => CompleteTaskDto::from(value.as_str()),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected task id");
            CompleteTaskDto::from("")
        }
    };

    let outcome = dto.validate();
    if !outcome.is_valid() {
        return Err(AppError::validation(outcome.joined()));
    }
    Ok(dto.task_id()?)
}
