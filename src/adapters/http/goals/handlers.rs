//! HTTP handlers for the goals endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::GoalLedger;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::goal::GoalError;

use super::dto::{ErrorResponse, GoalResponse, GoalsQuery};

/// Shared state for the goals endpoints.
#[derive(Clone)]
pub struct GoalsState {
    ledger: Arc<GoalLedger>,
}

impl GoalsState {
    pub fn new(ledger: Arc<GoalLedger>) -> Self {
        Self { ledger }
    }
}

/// GET /goals?user_id=<id> - List a user's goals with current progress
pub async fn list_goals(
    State(state): State<GoalsState>,
    Query(query): Query<GoalsQuery>,
) -> Response {
    let user_id = UserId::new(query.user_id);

    match state.ledger.get_goals(user_id, Timestamp::now()).await {
        Ok(goals) => {
            let response: Vec<GoalResponse> = goals.iter().map(GoalResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_goal_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_goal_error(error: GoalError) -> Response {
    match error {
        GoalError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        GoalError::GoalNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Goal", &id.to_string())),
        )
            .into_response(),
        GoalError::PeriodClosed => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "The period for this event has already closed",
            )),
        )
            .into_response(),
        GoalError::Storage(msg) => {
            tracing::error!(error = %msg, "storage failure serving goals request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Storage unavailable")),
            )
                .into_response()
        }
    }
}
