//! Goal-tracking error types.

use thiserror::Error;

use crate::domain::foundation::{GoalId, ValidationError};

/// Errors surfaced by goal-tracking operations.
///
/// Everything except `Storage` is an expected, user-recoverable outcome
/// rendered as a specific message at the gateway; `Storage` aborts the
/// current request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    /// A declaration or declaration set failed validation.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The referenced goal does not exist.
    #[error("Goal not found: {0}")]
    GoalNotFound(GoalId),

    /// The grace window for the event's period has elapsed.
    #[error("The period for this event has already closed")]
    PeriodClosed,

    /// The durable store failed.
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl GoalError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GoalError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        GoalError::Storage(message.into())
    }
}

impl From<ValidationError> for GoalError {
    fn from(err: ValidationError) -> Self {
        GoalError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
