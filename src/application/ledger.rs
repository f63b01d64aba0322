//! GoalLedger - the goal-tracking domain engine.
//!
//! Owns the consistency rules around goal sets and progress: declaration
//! set validation, the period grace check, and the ordering of lookup,
//! grace check, and durable write for progress logging. Storage atomicity
//! is delegated to the [`GoalStore`] port.

use std::sync::Arc;

use crate::domain::clock::PeriodClock;
use crate::domain::foundation::{GoalId, Timestamp, UserId};
use crate::domain::goal::{Declaration, Goal, GoalError, LogEntry, MAX_GOALS_PER_USER};
use crate::ports::GoalStore;

/// Service owning durable goal and progress state.
pub struct GoalLedger {
    store: Arc<dyn GoalStore>,
    clock: PeriodClock,
}

impl GoalLedger {
    /// Creates a ledger over the given store and period clock.
    pub fn new(store: Arc<dyn GoalStore>, clock: PeriodClock) -> Self {
        Self { store, clock }
    }

    /// Idempotent user upsert; refreshes the handle when one is supplied.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    pub async fn ensure_user(
        &self,
        user_id: UserId,
        handle: Option<&str>,
    ) -> Result<(), GoalError> {
        self.store.ensure_user(user_id, handle).await
    }

    /// Atomically replaces the user's goal set with `declarations`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the set is empty or has more than four entries
    /// - `Storage` on persistence failure
    pub async fn replace_goals(
        &self,
        user_id: UserId,
        declarations: Vec<Declaration>,
    ) -> Result<(), GoalError> {
        if declarations.is_empty() {
            return Err(GoalError::validation(
                "goals",
                "at least one goal is required",
            ));
        }
        if declarations.len() > MAX_GOALS_PER_USER {
            return Err(GoalError::validation(
                "goals",
                format!("at most {} goals are allowed", MAX_GOALS_PER_USER),
            ));
        }

        self.store.replace_goals(user_id, &declarations).await
    }

    /// Records one completion against a goal.
    ///
    /// `occurred_at` is the event's timestamp (the gateway's receipt time,
    /// which becomes the log entry's timestamp); `now` is the decision
    /// time. The event is accepted only while `now` is within the grace
    /// window of the period containing `occurred_at`.
    ///
    /// # Errors
    ///
    /// - `GoalNotFound` if the goal does not exist
    /// - `PeriodClosed` once the grace window has elapsed
    /// - `Storage` on persistence failure
    pub async fn log_progress(
        &self,
        goal_id: GoalId,
        occurred_at: Timestamp,
        now: Timestamp,
    ) -> Result<Goal, GoalError> {
        let period_start = self.clock.period_start(occurred_at);

        if self.store.find_goal(goal_id, period_start).await?.is_none() {
            return Err(GoalError::GoalNotFound(goal_id));
        }

        if !self.clock.is_within_grace(now, occurred_at) {
            return Err(GoalError::PeriodClosed);
        }

        self.store
            .record_progress(goal_id, occurred_at, period_start)
            .await
    }

    /// The user's current goals with progress for the period containing
    /// `now`. Empty for unknown users.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    pub async fn get_goals(&self, user_id: UserId, now: Timestamp) -> Result<Vec<Goal>, GoalError> {
        self.store
            .goals_for_user(user_id, self.clock.period_start(now))
            .await
    }

    /// The immutable completion log backing a goal's counter, oldest first.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    pub async fn progress_log(&self, goal_id: GoalId) -> Result<Vec<LogEntry>, GoalError> {
        self.store.logs_for_goal(goal_id).await
    }
}
