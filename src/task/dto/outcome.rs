//! Result of validating a DTO.

/// Ordered list of validation messages produced by a DTO.
///
/// An outcome with no messages is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<String>,
}

impl ValidationOutcome {
    /// Creates an empty, valid outcome.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends a validation message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Returns `true` when no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the messages in the order the rules were checked.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Joins the messages with `", "` for a single error response.
    #[must_use]
    pub fn joined(&self) -> String {
        self.errors.join(", ")
    }
}
