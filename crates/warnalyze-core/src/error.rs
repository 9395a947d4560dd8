//! Screening error types.
//!
//! Defined in `warnalyze-core` so the CLI and the stores can downcast an
//! `anyhow::Error` and tell a rejected submission apart from an I/O failure.

use thiserror::Error;

/// Errors raised while scoring a submitted answer list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// An answer referenced a plate that is not in the question bank.
    #[error("unknown question id: {0}")]
    UnknownQuestion(u32),

    /// The same plate was answered more than once in one submission.
    #[error("duplicate answer for question id: {0}")]
    DuplicateAnswer(u32),
}

/// A form field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors that can occur while running a screening session end to end.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("student not found: {0}")]
    StudentNotFound(u64),

    #[error("teacher not found: {0}")]
    TeacherNotFound(u64),

    #[error("teacher {0} is deactivated")]
    TeacherInactive(u64),

    #[error("test result not found: {0}")]
    ResultNotFound(u64),

    #[error("a teacher with NIP {0} already exists")]
    DuplicateNip(String),

    #[error("a user with e-mail {0} already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ScreeningError {
    /// Returns `true` if the caller sent bad input (as opposed to a missing record).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ScreeningError::Scoring(_)
                | ScreeningError::Validation(_)
                | ScreeningError::TeacherInactive(_)
                | ScreeningError::DuplicateNip(_)
                | ScreeningError::DuplicateEmail(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ScoringError::UnknownQuestion(42).to_string(),
            "unknown question id: 42"
        );
        assert_eq!(
            ValidationError::new("email", "missing '@'").to_string(),
            "invalid email: missing '@'"
        );
        let err: ScreeningError = ScoringError::DuplicateAnswer(3).into();
        assert_eq!(err.to_string(), "duplicate answer for question id: 3");
    }

    #[test]
    fn rejection_classification() {
        assert!(ScreeningError::from(ScoringError::UnknownQuestion(1)).is_rejection());
        assert!(ScreeningError::TeacherInactive(2).is_rejection());
        assert!(!ScreeningError::StudentNotFound(9).is_rejection());
    }
}
