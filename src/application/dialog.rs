//! GoalDialogs - per-user goal-setup session registry.
//!
//! Owns the transient dialog sessions keyed by user id and drives commits
//! through the ledger. Sessions live in process memory only; losing an
//! uncommitted declaration set on restart is acceptable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::ledger::GoalLedger;
use crate::domain::dialog::{DialogSession, SubmitOutcome};
use crate::domain::foundation::UserId;
use crate::domain::goal::{Declaration, GoalError};

/// Outcome of a dialog interaction, rendered to text by the chat gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogReply {
    /// A declaration was accepted.
    Added {
        declaration: Declaration,
        count: usize,
    },
    /// The line did not match the expected format.
    Malformed,
    /// The pending list already holds the maximum number of goals.
    LimitReached,
    /// `done` was entered with nothing pending.
    NothingToCommit,
    /// The declaration set was committed; `count` goals are now active.
    Committed { count: usize },
    /// The commit failed; the pending list is intact and `done` can be
    /// retried.
    CommitFailed(GoalError),
    /// An in-progress dialog was cancelled.
    Cancelled,
}

/// Registry of in-progress goal-setup dialogs.
pub struct GoalDialogs {
    ledger: Arc<GoalLedger>,
    // Never held across an await: sessions are removed before the async
    // commit and reinstated if it fails.
    sessions: Mutex<HashMap<UserId, DialogSession>>,
}

impl GoalDialogs {
    /// Creates a registry committing through the given ledger.
    pub fn new(ledger: Arc<GoalLedger>) -> Self {
        Self {
            ledger,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Starts (or restarts) a goal-setup dialog for the user, clearing any
    /// previously pending declarations.
    pub fn start(&self, user_id: UserId) {
        self.lock_sessions().insert(user_id, DialogSession::start());
    }

    /// Whether the user currently has a dialog in progress.
    pub fn is_collecting(&self, user_id: UserId) -> bool {
        self.lock_sessions().contains_key(&user_id)
    }

    /// Cancels the user's dialog, if any.
    ///
    /// Returns `None` when there was nothing to cancel.
    pub fn cancel(&self, user_id: UserId) -> Option<DialogReply> {
        self.lock_sessions()
            .remove(&user_id)
            .map(|_| DialogReply::Cancelled)
    }

    /// Feeds one line of user input to the user's dialog.
    ///
    /// Returns `None` when the user has no dialog in progress; the gateway
    /// routes or drops such input.
    pub async fn submit(&self, user_id: UserId, line: &str) -> Option<DialogReply> {
        let outcome = {
            let mut sessions = self.lock_sessions();
            let session = sessions.get_mut(&user_id)?;
            let outcome = session.submit(line);
            if matches!(outcome, SubmitOutcome::Finished(_)) {
                sessions.remove(&user_id);
            }
            outcome
        };

        let reply = match outcome {
            SubmitOutcome::Added { declaration, count } => {
                DialogReply::Added { declaration, count }
            }
            SubmitOutcome::Malformed => DialogReply::Malformed,
            SubmitOutcome::LimitReached => DialogReply::LimitReached,
            SubmitOutcome::NothingToCommit => DialogReply::NothingToCommit,
            SubmitOutcome::Finished(declarations) => {
                self.commit(user_id, declarations).await
            }
        };
        Some(reply)
    }

    async fn commit(&self, user_id: UserId, declarations: Vec<Declaration>) -> DialogReply {
        let count = declarations.len();
        match self
            .ledger
            .replace_goals(user_id, declarations.clone())
            .await
        {
            Ok(()) => DialogReply::Committed { count },
            Err(err) => {
                // Keep the collected set so the user can retry `done`.
                self.lock_sessions()
                    .insert(user_id, DialogSession::with_pending(declarations));
                DialogReply::CommitFailed(err)
            }
        }
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, DialogSession>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
