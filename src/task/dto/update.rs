//! Input validation for partial task updates.

use super::ValidationOutcome;
use crate::task::domain::{TaskChanges, TaskDescription, TaskDomainError, TaskTitle};

/// Optional replacement title and description for an existing task.
///
/// Provided fields are trimmed and held to the same rules as creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskDto {
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskDto {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        self.title = Some(title.as_ref().trim().to_owned());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(description.as_ref().trim().to_owned());
        self
    }

    /// Checks the rules for every provided field.
    #[must_use]
    pub fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        if let Some(Err(err)) = self.title.as_deref().map(TaskTitle::new) {
            outcome.push(err.to_string());
        }
        if let Some(Err(err)) = self.description.as_deref().map(TaskDescription::new) {
            outcome.push(err.to_string());
        }
        outcome
    }

    /// Converts the DTO into a domain change set.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] encountered.
    pub fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        Ok(TaskChanges {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description.map(TaskDescription::new).transpose()?,
        })
    }
}
