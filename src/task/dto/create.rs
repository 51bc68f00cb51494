//! Input validation for task creation.

use super::ValidationOutcome;
use crate::task::domain::{TaskDescription, TaskDomainError, TaskTitle};

/// Raw title and description submitted for a new task.
///
/// Construction trims both fields; [`CreateTaskDto::validate`] then checks
/// every rule independently so all violations are reported together.
///
/// # Examples
///
/// ```
/// use tasktrack::task::dto::CreateTaskDto;
///
/// let dto = CreateTaskDto::new("  Buy milk ", "2%");
/// assert_eq!(dto.title(), "Buy milk");
/// assert!(dto.validate().is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskDto {
    title: String,
    description: String,
}

impl CreateTaskDto {
    /// Creates a DTO from raw input, trimming both fields.
    #[must_use]
    pub fn new(title: impl AsRef<str>, description: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_owned(),
            description: description.as_ref().trim().to_owned(),
        }
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks the title and description rules.
    #[must_use]
    pub fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        if let Err(err) = TaskTitle::new(&self.title) {
            outcome.push(err.to_string());
        }
        if let Err(err) = TaskDescription::new(&self.description) {
            outcome.push(err.to_string());
        }
        outcome
    }

    /// Converts the DTO into validated domain values.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] encountered; call
    /// [`CreateTaskDto::validate`] first to collect every violation.
    pub fn into_domain(self) -> Result<(TaskTitle, TaskDescription), TaskDomainError> {
        Ok((
            TaskTitle::new(self.title)?,
            TaskDescription::new(self.description)?,
        ))
    }
}
