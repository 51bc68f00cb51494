//! JSON response envelopes.
//!
//! Success body:
//!
//! ```json
//! { "success": true, "message": "Task created successfully", "data": { "id": 1 } }
//! ```
//!
//! Error body:
//!
//! ```json
//! { "success": false, "error": { "message": "Task not found", "statusCode": 404 } }
//! ```

use axum::http::StatusCode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::task::domain::Task;

/// Message returned after a task is created.
pub const TASK_CREATED_MESSAGE: &str = "Task created successfully";

/// Message returned after a task is completed.
pub const TASK_COMPLETED_MESSAGE: &str = "Task completed successfully";

/// Message returned by the health check.
pub const SERVER_RUNNING_MESSAGE: &str = "Server is running";

/// Message returned when a request body cannot be decoded.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Formats a timestamp as RFC 3339 with millisecond precision and a `Z`
/// suffix.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Successful response body.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl<T> SuccessEnvelope<T> {
    /// Wraps a payload without a message.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
            count: None,
        }
    }

    /// Wraps a payload with a human-readable message.
    #[must_use]
    pub const fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
            count: None,
        }
    }
}

impl<T> SuccessEnvelope<Vec<T>> {
    /// Wraps a list payload together with its length.
    #[must_use]
    pub fn listing(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            message: None,
            data,
            count: Some(count),
        }
    }
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    id: i64,
    title: String,
    description: String,
    is_completed: bool,
    created_at: String,
}

impl From<&Task> for TaskBody {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            is_completed: task.is_completed(),
            created_at: format_timestamp(task.created_at()),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl ErrorEnvelope {
    /// Builds an error body from its parts.
    #[must_use]
    pub fn new(message: impl Into<String>, status: StatusCode, stack: Option<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: message.into(),
                status_code: status.as_u16(),
                stack,
            },
        }
    }

    /// Builds the client-facing body for an application error.
    ///
    /// Unclassified errors render the generic internal-error message.
    #[must_use]
    pub fn from_error(err: &AppError, stack: Option<String>) -> Self {
        Self::new(err.client_message(), err.status_code(), stack)
    }
}

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthEnvelope {
    success: bool,
    message: &'static str,
    timestamp: String,
}

impl HealthEnvelope {
    /// Builds a health response stamped with `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            success: true,
            message: SERVER_RUNNING_MESSAGE,
            timestamp: format_timestamp(now),
        }
    }
}
