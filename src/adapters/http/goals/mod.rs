//! Goals HTTP adapter - the query gateway for the companion front end.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, GoalResponse, GoalsQuery};
pub use handlers::GoalsState;
pub use routes::goals_routes;
