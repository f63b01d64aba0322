//! Completion log entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GoalId, LogEntryId, Timestamp};

/// An immutable completion event recorded against a goal.
///
/// Log entries are the durable evidence behind a goal's progress counter;
/// once written they are never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    id: LogEntryId,
    goal_id: GoalId,
    timestamp: Timestamp,
}

impl LogEntry {
    /// Reconstitute a log entry from persistence.
    pub fn reconstitute(id: LogEntryId, goal_id: GoalId, timestamp: Timestamp) -> Self {
        Self {
            id,
            goal_id,
            timestamp,
        }
    }

    /// Returns the entry id.
    pub fn id(&self) -> LogEntryId {
        self.id
    }

    /// Returns the goal this entry belongs to.
    pub fn goal_id(&self) -> GoalId {
        self.goal_id
    }

    /// When the completion occurred.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
