//! Goal declarations collected during the setup dialog.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum number of goals a user may hold at once.
pub const MAX_GOALS_PER_USER: usize = 4;

/// A single (frequency, name) pair declared during goal setup.
///
/// # Invariants
///
/// - `frequency` is positive
/// - `name` is non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    frequency: u32,
    name: String,
}

impl Declaration {
    /// Creates a validated declaration.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `frequency` is zero
    /// - `EmptyField` if `name` trims to nothing
    pub fn new(frequency: u32, name: impl Into<String>) -> Result<Self, ValidationError> {
        if frequency == 0 {
            return Err(ValidationError::out_of_range("frequency", 1, i64::MAX, 0));
        }
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            frequency,
            name: trimmed.to_string(),
        })
    }

    /// Target occurrences per period.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// The goal's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
