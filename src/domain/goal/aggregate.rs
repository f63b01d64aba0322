//! Goal entity.
//!
//! Goals are created only through goal-set replacement, so there is no
//! validated constructor here; storage reconstitutes them from rows, with
//! `frequency_done` already derived for the period being read.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GoalId, UserId};

/// A user's recurring goal, with progress for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    user_id: UserId,
    name: String,
    frequency_aimed: u32,
    frequency_done: u32,
}

impl Goal {
    /// Reconstitute a goal from persistence.
    pub fn reconstitute(
        id: GoalId,
        user_id: UserId,
        name: String,
        frequency_aimed: u32,
        frequency_done: u32,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            frequency_aimed,
            frequency_done,
        }
    }

    /// Returns the goal id.
    pub fn id(&self) -> GoalId {
        self.id
    }

    /// Returns the owning user's id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the goal's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target occurrences per period.
    pub fn frequency_aimed(&self) -> u32 {
        self.frequency_aimed
    }

    /// Occurrences recorded in the period this snapshot was read for.
    pub fn frequency_done(&self) -> u32 {
        self.frequency_done
    }
}
