//! Goal store port.
//!
//! Defines the storage contract for users, goal sets, and completion logs.
//! Implementations own the transaction boundaries: goal-set replacement and
//! progress recording must each be atomic, and the progress counter bump
//! must be a relative update evaluated by the store so concurrent callers
//! never lose an increment.

use async_trait::async_trait;

use crate::domain::foundation::{GoalId, Timestamp, UserId};
use crate::domain::goal::{Declaration, Goal, GoalError, LogEntry};

/// Storage port for goal-tracking state.
///
/// Reads take the start of the period being asked about and derive
/// per-period progress from the log rows inside that window.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Idempotent user upsert; refreshes the handle when one is supplied.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    async fn ensure_user(&self, user_id: UserId, handle: Option<&str>) -> Result<(), GoalError>;

    /// Atomically replaces the user's goal set.
    ///
    /// Deletes all existing goals for the user (and their log evidence)
    /// and inserts the new declarations with zero progress. Partial
    /// application must never be observable.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    async fn replace_goals(
        &self,
        user_id: UserId,
        declarations: &[Declaration],
    ) -> Result<(), GoalError>;

    /// Looks up a single goal with progress derived for the given period.
    ///
    /// Returns `None` if the goal does not exist.
    async fn find_goal(
        &self,
        goal_id: GoalId,
        period_start: Timestamp,
    ) -> Result<Option<Goal>, GoalError>;

    /// Records one completion: inserts a log entry stamped `occurred_at`
    /// and bumps the stored counter with a relative update, atomically.
    ///
    /// Returns the updated goal with progress derived for the given period.
    ///
    /// # Errors
    ///
    /// - `GoalNotFound` if the goal vanished since lookup
    /// - `Storage` on persistence failure
    async fn record_progress(
        &self,
        goal_id: GoalId,
        occurred_at: Timestamp,
        period_start: Timestamp,
    ) -> Result<Goal, GoalError>;

    /// The user's current goals in insertion order, with progress derived
    /// for the given period. Empty for unknown users.
    async fn goals_for_user(
        &self,
        user_id: UserId,
        period_start: Timestamp,
    ) -> Result<Vec<Goal>, GoalError>;

    /// The immutable log entries recorded against a goal, oldest first.
    async fn logs_for_goal(&self, goal_id: GoalId) -> Result<Vec<LogEntry>, GoalError>;
}
