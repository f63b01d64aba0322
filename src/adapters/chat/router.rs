//! Chat gateway - routes inbound chat events and renders replies.
//!
//! Commands and structured actions go straight to the ledger; free text is
//! offered to the dialog registry and dropped when no dialog is in
//! progress. Every domain error becomes a specific user-facing message
//! here; only storage faults are logged.

use std::sync::Arc;

use crate::application::{DialogReply, GoalDialogs, GoalLedger};
use crate::domain::foundation::{GoalId, Timestamp, UserId};
use crate::domain::goal::{Goal, GoalError, MAX_GOALS_PER_USER};
use crate::ports::{
    ChatAction, ChatCommand, ChatError, InboundEvent, InboundKind, Reply, ReplyAction, ReplySink,
};

/// Routes inbound chat events to the dialog registry and the ledger.
pub struct ChatRouter {
    ledger: Arc<GoalLedger>,
    dialogs: Arc<GoalDialogs>,
    replies: Arc<dyn ReplySink>,
    /// Companion web-app URL offered on the welcome menu, when configured.
    webapp_url: Option<String>,
}

impl ChatRouter {
    /// Creates a router delivering replies through the given sink.
    pub fn new(
        ledger: Arc<GoalLedger>,
        dialogs: Arc<GoalDialogs>,
        replies: Arc<dyn ReplySink>,
        webapp_url: Option<String>,
    ) -> Self {
        Self {
            ledger,
            dialogs,
            replies,
            webapp_url,
        }
    }

    /// Handles one inbound event end to end.
    ///
    /// # Errors
    ///
    /// - `Transport` if the reply could not be delivered
    pub async fn handle_event(&self, event: InboundEvent) -> Result<(), ChatError> {
        let user_id = event.user_id;

        let reply = match event.kind {
            InboundKind::Command(ChatCommand::Start) => {
                Some(self.handle_start(user_id, event.handle.as_deref()).await)
            }
            InboundKind::Command(ChatCommand::SetGoals) => Some(self.handle_set_goals(user_id)),
            InboundKind::Command(ChatCommand::Cancel) => self.handle_cancel(user_id),
            InboundKind::Text(text) => self.handle_text(user_id, &text).await,
            InboundKind::Action(ChatAction::LogGoal { goal_id }) => Some(
                self.handle_log_goal(user_id, goal_id, event.received_at)
                    .await,
            ),
        };

        match reply {
            Some(reply) => self.replies.send(user_id, reply).await,
            None => Ok(()),
        }
    }

    async fn handle_start(&self, user_id: UserId, handle: Option<&str>) -> Reply {
        if let Err(err) = self.ledger.ensure_user(user_id, handle).await {
            tracing::error!(%user_id, error = %err, "failed to register user");
            return Reply::text(GENERIC_FAILURE);
        }

        let mut actions = Vec::new();
        if let Some(url) = &self.webapp_url {
            actions.push(ReplyAction::OpenApp { url: url.clone() });
        }
        actions.push(ReplyAction::SetGoals);

        Reply::with_actions(
            "Welcome! Use the buttons below to manage your goals.",
            actions,
        )
    }

    fn handle_set_goals(&self, user_id: UserId) -> Reply {
        self.dialogs.start(user_id);
        Reply::text(format!(
            "Please enter your goals in the format: {{Frequency}} {{GoalName}}\n\
             For example: 2x Gym\n\
             You can set up to {} goals. Enter 'done' when finished.",
            MAX_GOALS_PER_USER
        ))
    }

    fn handle_cancel(&self, user_id: UserId) -> Option<Reply> {
        self.dialogs
            .cancel(user_id)
            .map(|_| Reply::text("Goal setup cancelled."))
    }

    async fn handle_text(&self, user_id: UserId, text: &str) -> Option<Reply> {
        let reply = self.dialogs.submit(user_id, text).await?;
        Some(render_dialog_reply(user_id, &reply))
    }

    async fn handle_log_goal(
        &self,
        user_id: UserId,
        goal_id: GoalId,
        received_at: Timestamp,
    ) -> Reply {
        match self
            .ledger
            .log_progress(goal_id, received_at, Timestamp::now())
            .await
        {
            Ok(goal) => render_progress(&goal),
            Err(GoalError::PeriodClosed) => Reply::text(
                "Sorry, that period has already closed. You can't log progress for it anymore.",
            ),
            Err(GoalError::GoalNotFound(_)) => Reply::text(
                "That goal no longer exists. Open the app to see your current goals.",
            ),
            Err(err) => {
                tracing::error!(%user_id, %goal_id, error = %err, "failed to log progress");
                Reply::text(GENERIC_FAILURE)
            }
        }
    }
}

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

fn render_progress(goal: &Goal) -> Reply {
    Reply::text(format!(
        "Progress logged for {}!\nYou've completed this goal {}/{} times this period.",
        goal.name(),
        goal.frequency_done(),
        goal.frequency_aimed()
    ))
}

fn render_dialog_reply(user_id: UserId, reply: &DialogReply) -> Reply {
    match reply {
        DialogReply::Added { declaration, count } => Reply::text(format!(
            "Goal added: {}x {}\nYou have set {} goals. Enter another goal or 'done' to finish.",
            declaration.frequency(),
            declaration.name(),
            count
        )),
        DialogReply::Malformed => {
            Reply::text("Invalid format. Please use the format: {Frequency} {GoalName}")
        }
        DialogReply::LimitReached => Reply::text(format!(
            "You've already set {} goals. Enter 'done' to finish.",
            MAX_GOALS_PER_USER
        )),
        DialogReply::NothingToCommit => {
            Reply::text("You haven't set any goals yet. Please set at least one goal.")
        }
        DialogReply::Committed { .. } => Reply::text("Your goals have been set successfully!"),
        DialogReply::CommitFailed(GoalError::Validation { message, .. }) => {
            Reply::text(format!("Couldn't save your goals: {}", message))
        }
        DialogReply::CommitFailed(err) => {
            tracing::error!(%user_id, error = %err, "failed to commit goal set");
            Reply::text("Couldn't save your goals right now. Enter 'done' to try again.")
        }
        DialogReply::Cancelled => Reply::text("Goal setup cancelled."),
    }
}
