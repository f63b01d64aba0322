//! SQLite implementation of GoalStore.
//!
//! Persists users, goal sets, and completion logs. Progress for a period is
//! derived with a correlated count over `logs`, so reads never depend on a
//! rollover reset; the stored `frequency_done` column is the all-time tally
//! and is bumped with a relative update inside the logging transaction.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{GoalId, LogEntryId, Timestamp, UserId};
use crate::domain::goal::{Declaration, Goal, GoalError, LogEntry};
use crate::ports::GoalStore;

/// SQLite implementation of GoalStore.
#[derive(Clone)]
pub struct SqliteGoalStore {
    pool: SqlitePool,
}

impl SqliteGoalStore {
    /// Creates a new SqliteGoalStore.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const GOAL_COLUMNS: &str = r#"
    g.id, g.user_id, g.name, g.frequency_aimed,
    (SELECT COUNT(*) FROM logs l
      WHERE l.goal_id = g.id AND l.timestamp >= ?2) AS frequency_done
"#;

#[async_trait]
impl GoalStore for SqliteGoalStore {
    async fn ensure_user(&self, user_id: UserId, handle: Option<&str>) -> Result<(), GoalError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, username) VALUES (?1, ?2)
            ON CONFLICT (telegram_id)
            DO UPDATE SET username = COALESCE(excluded.username, username)
            "#,
        )
        .bind(user_id.as_i64())
        .bind(handle)
        .execute(&self.pool)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to upsert user: {}", e)))?;

        Ok(())
    }

    async fn replace_goals(
        &self,
        user_id: UserId,
        declarations: &[Declaration],
    ) -> Result<(), GoalError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GoalError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM goals WHERE user_id = ?1")
            .bind(user_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| GoalError::storage(format!("Failed to clear goal set: {}", e)))?;

        for declaration in declarations {
            sqlx::query(
                r#"
                INSERT INTO goals (user_id, name, frequency_aimed, frequency_done)
                VALUES (?1, ?2, ?3, 0)
                "#,
            )
            .bind(user_id.as_i64())
            .bind(declaration.name())
            .bind(i64::from(declaration.frequency()))
            .execute(&mut *tx)
            .await
            .map_err(|e| GoalError::storage(format!("Failed to insert goal: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| GoalError::storage(format!("Failed to commit goal set: {}", e)))
    }

    async fn find_goal(
        &self,
        goal_id: GoalId,
        period_start: Timestamp,
    ) -> Result<Option<Goal>, GoalError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM goals g WHERE g.id = ?1",
            GOAL_COLUMNS
        ))
        .bind(goal_id.as_i64())
        .bind(period_start.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to fetch goal: {}", e)))?;

        row.map(|row| row_to_goal(&row)).transpose()
    }

    async fn record_progress(
        &self,
        goal_id: GoalId,
        occurred_at: Timestamp,
        period_start: Timestamp,
    ) -> Result<Goal, GoalError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GoalError::storage(format!("Failed to begin transaction: {}", e)))?;

        // Relative update evaluated by the store; concurrent callers both
        // land their increment.
        let updated = sqlx::query(
            "UPDATE goals SET frequency_done = frequency_done + 1 WHERE id = ?1",
        )
        .bind(goal_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to bump progress counter: {}", e)))?;

        if updated.rows_affected() == 0 {
            return Err(GoalError::GoalNotFound(goal_id));
        }

        sqlx::query("INSERT INTO logs (goal_id, timestamp) VALUES (?1, ?2)")
            .bind(goal_id.as_i64())
            .bind(occurred_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| GoalError::storage(format!("Failed to insert log entry: {}", e)))?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM goals g WHERE g.id = ?1",
            GOAL_COLUMNS
        ))
        .bind(goal_id.as_i64())
        .bind(period_start.as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to fetch updated goal: {}", e)))?;

        let goal = row_to_goal(&row)?;

        tx.commit()
            .await
            .map_err(|e| GoalError::storage(format!("Failed to commit progress: {}", e)))?;

        Ok(goal)
    }

    async fn goals_for_user(
        &self,
        user_id: UserId,
        period_start: Timestamp,
    ) -> Result<Vec<Goal>, GoalError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM goals g WHERE g.user_id = ?1 ORDER BY g.id",
            GOAL_COLUMNS
        ))
        .bind(user_id.as_i64())
        .bind(period_start.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to fetch goals: {}", e)))?;

        rows.iter().map(row_to_goal).collect()
    }

    async fn logs_for_goal(&self, goal_id: GoalId) -> Result<Vec<LogEntry>, GoalError> {
        let rows = sqlx::query(
            "SELECT id, goal_id, timestamp FROM logs WHERE goal_id = ?1 ORDER BY id",
        )
        .bind(goal_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GoalError::storage(format!("Failed to fetch log entries: {}", e)))?;

        rows.iter().map(row_to_log_entry).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_goal(row: &sqlx::sqlite::SqliteRow) -> Result<Goal, GoalError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| GoalError::storage(format!("Failed to get id: {}", e)))?;

    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| GoalError::storage(format!("Failed to get user_id: {}", e)))?;

    let name: String = row
        .try_get("name")
        .map_err(|e| GoalError::storage(format!("Failed to get name: {}", e)))?;

    let frequency_aimed: i64 = row
        .try_get("frequency_aimed")
        .map_err(|e| GoalError::storage(format!("Failed to get frequency_aimed: {}", e)))?;

    let frequency_done: i64 = row
        .try_get("frequency_done")
        .map_err(|e| GoalError::storage(format!("Failed to get frequency_done: {}", e)))?;

    Ok(Goal::reconstitute(
        GoalId::new(id),
        UserId::new(user_id),
        name,
        frequency_aimed as u32,
        frequency_done as u32,
    ))
}

fn row_to_log_entry(row: &sqlx::sqlite::SqliteRow) -> Result<LogEntry, GoalError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| GoalError::storage(format!("Failed to get id: {}", e)))?;

    let goal_id: i64 = row
        .try_get("goal_id")
        .map_err(|e| GoalError::storage(format!("Failed to get goal_id: {}", e)))?;

    let timestamp: chrono::DateTime<chrono::Utc> = row
        .try_get("timestamp")
        .map_err(|e| GoalError::storage(format!("Failed to get timestamp: {}", e)))?;

    Ok(LogEntry::reconstitute(
        LogEntryId::new(id),
        GoalId::new(goal_id),
        Timestamp::from_datetime(timestamp),
    ))
}
