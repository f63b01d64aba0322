//! HTTP routes for the goals endpoint.

use axum::{routing::get, Router};

use super::handlers::{list_goals, GoalsState};

/// Creates the goals router.
pub fn goals_routes(state: GoalsState) -> Router {
    Router::new()
        .route("/goals", get(list_goals))
        .with_state(state)
}
