//! Error types for task domain validation.
//!
//! The display strings double as the client-facing validation messages, so
//! they are part of the HTTP contract.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("Title is required and must be a non-empty string")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("Title must not exceed 255 characters")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
    },

    /// The description is empty after trimming.
    #[error("Description is required and must be a non-empty string")]
    EmptyDescription,

    /// The identifier is not a strictly positive integer.
    #[error("Invalid task ID")]
    InvalidTaskId(i64),

    /// The task has already been marked as completed.
    #[error("Task is already completed")]
    AlreadyCompleted(TaskId),
}
