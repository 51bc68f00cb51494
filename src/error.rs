//! Application error taxonomy.
//!
//! Every failure that can reach an HTTP client is an [`AppError`]. The
//! variant determines the [`ErrorKind`], which in turn fixes the status code
//! and whether the error is operational (an expected, client-visible
//! condition) or unclassified (a defect whose details stay in the logs).

use std::error::Error;
use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::task::{
    domain::TaskDomainError, ports::TaskRepositoryError, services::TaskServiceError,
};

/// Message rendered for every unclassified failure.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Message rendered when the store cannot be reached.
pub const DATABASE_ERROR_MESSAGE: &str = "Database operation failed";

/// Shared, cloneable error source.
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// Classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid input or a business-rule violation.
    Validation,
    /// The referenced resource does not exist.
    NotFound,
    /// The store could not be reached.
    Database,
    /// Anything else.
    Unclassified,
}

impl ErrorKind {
    /// HTTP status used when rendering this kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database | Self::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether errors of this kind carry a client-safe message.
    #[must_use]
    pub const fn is_operational(self) -> bool {
        !matches!(self, Self::Unclassified)
    }

    /// Stable name used in logs and diagnostic traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::NotFound => "NotFoundError",
            Self::Database => "DatabaseError",
            Self::Unclassified => "Error",
        }
    }
}

/// Failure propagated to the HTTP layer.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Invalid input or a business-rule violation.
    #[error("{0}")]
    Validation(String),

    /// The referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The store could not be reached.
    #[error("Database operation failed")]
    Database(#[source] SharedError),

    /// An unexpected failure.
    #[error(transparent)]
    Unclassified(SharedError),
}

impl AppError {
    /// Builds a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Wraps a store connectivity failure.
    #[must_use]
    pub fn database(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Wraps an unexpected failure.
    #[must_use]
    pub fn unclassified(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Unclassified(Arc::new(err))
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Database,
            Self::Unclassified(_) => ErrorKind::Unclassified,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Whether this error is an expected, client-visible condition.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.kind().is_operational()
    }

    /// Message safe to show to a client.
    ///
    /// Unclassified errors never expose their own message.
    #[must_use]
    pub fn client_message(&self) -> String {
        if self.is_operational() {
            self.to_string()
        } else {
            INTERNAL_SERVER_ERROR_MESSAGE.to_owned()
        }
    }

    /// Multi-line trace of this error and its source chain.
    ///
    /// The first line names the kind and message; every following line is
    /// one `caused by` entry.
    #[must_use]
    pub fn diagnostic_trace(&self) -> String {
        let mut trace = format!("{}: {self}", self.kind().as_str());
        let mut current = self.source();
        while let Some(cause) = current {
            trace.push_str("\n    caused by: ");
            trace.push_str(&cause.to_string());
            current = cause.source();
        }
        trace
    }
}

impl From<TaskDomainError> for AppError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TaskServiceError> for AppError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(message) => Self::Validation(message),
            TaskServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskServiceError::Repository(repository_err) => repository_err.into(),
        }
    }
}

impl From<TaskRepositoryError> for AppError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => {
                Self::NotFound(TaskServiceError::NotFound(id).to_string())
            }
            TaskRepositoryError::ConstraintViolation(message) => Self::Validation(message),
            TaskRepositoryError::Unavailable(source) => Self::Database(source),
            other @ TaskRepositoryError::Persistence(_) => Self::unclassified(other),
        }
    }
}
