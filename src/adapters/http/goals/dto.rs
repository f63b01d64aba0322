//! HTTP DTOs for the goals endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::goal::Goal;

/// Query parameters for listing a user's goals.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalsQuery {
    pub user_id: i64,
}

/// One goal with its current-period progress.
#[derive(Debug, Clone, Serialize)]
pub struct GoalResponse {
    pub id: i64,
    pub name: String,
    pub frequency_aimed: u32,
    pub frequency_done: u32,
}

impl From<&Goal> for GoalResponse {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id().as_i64(),
            name: goal.name().to_string(),
            frequency_aimed: goal.frequency_aimed(),
            frequency_done: goal.frequency_done(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
