//! Input validation for identifying an existing task.

use super::ValidationOutcome;
use crate::task::domain::{TaskDomainError, TaskId};

/// Task identifier taken from a request path or a numeric value.
///
/// Text input is parsed the lenient way browsers and HTTP clients commonly
/// produce it: leading whitespace is skipped, an optional sign is accepted,
/// and the longest run of leading decimal digits is used, so `"12abc"` reads
/// as `12` and `"abc"` is not a number.
///
/// # Examples
///
/// ```
/// use tasktrack::task::dto::CompleteTaskDto;
///
/// let dto = CompleteTaskDto::from("-123");
/// assert_eq!(dto.id(), Some(-123));
/// assert!(!dto.validate().is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteTaskDto {
    id: Option<i64>,
}

impl CompleteTaskDto {
    /// Returns the parsed identifier, or `None` when the input was not a
    /// number.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Checks that the identifier is a strictly positive integer.
    #[must_use]
    pub fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        if let Err(err) = self.task_id() {
            outcome.push(err.to_string());
        }
        outcome
    }

    /// Returns the validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the input was not a
    /// number or is not strictly positive.
    pub fn task_id(&self) -> Result<TaskId, TaskDomainError> {
        let value = self.id.ok_or(TaskDomainError::InvalidTaskId(0))?;
        TaskId::new(value)
    }
}

impl From<&str> for CompleteTaskDto {
    fn from(raw: &str) -> Self {
        Self {
            id: parse_leading_integer(raw),
        }
    }
}

impl From<i64> for CompleteTaskDto {
    fn from(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

/// Parses the leading base-10 integer of `raw`.
///
/// Returns `None` when no digits follow the optional sign. A digit run too
/// long for an `i64` saturates at `i64::MAX` (or `i64::MIN` when negative).
fn parse_leading_integer(raw: &str) -> Option<i64> {
    let rest = raw.trim_start();
    let (negative, unsigned) = match rest.strip_prefix('-') {
        Some(tail) => (true, tail),
        None => (false, rest.strip_prefix('+').unwrap_or(rest)),
    };
    let digits: Vec<i64> = unsigned
        .chars()
        .map_while(|character| character.to_digit(10))
        .map(i64::from)
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.into_iter().fold(0_i64, |acc, digit| {
        let shifted = acc.saturating_mul(10);
        if negative {
            shifted.saturating_sub(digit)
        } else {
            shifted.saturating_add(digit)
        }
    }))
}
