//! Goal-setup dialog session.
//!
//! A session collects up to four goal declarations across chat turns.
//! The machine itself is pure: it parses lines, tracks the pending list,
//! and signals when the collected set is ready to commit. Persisting the
//! committed set is the caller's job, which is why `Finished` hands the
//! declarations back instead of consuming them silently.

use crate::domain::goal::{Declaration, MAX_GOALS_PER_USER};

/// Result of feeding one line of user input to a collecting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The line was accepted; `count` declarations are now pending.
    Added {
        declaration: Declaration,
        count: usize,
    },
    /// The line did not match the `<frequency><name>` format.
    Malformed,
    /// Four declarations are already pending; the line was discarded.
    LimitReached,
    /// `done` was entered with nothing pending.
    NothingToCommit,
    /// `done` was entered; the pending declarations are ready to commit.
    ///
    /// The session's pending list is drained. If the commit fails, restore
    /// the session with [`DialogSession::with_pending`] so `done` can be
    /// retried.
    Finished(Vec<Declaration>),
}

/// A per-user goal-setup session in the `Collecting` state.
///
/// `Idle` is represented by the absence of a session; the registry that
/// owns sessions creates one on `start` and drops it on completion or
/// cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogSession {
    pending: Vec<Declaration>,
}

impl DialogSession {
    /// Starts a fresh session with an empty pending list.
    pub fn start() -> Self {
        Self::default()
    }

    /// Restores a session with a previously collected pending list.
    pub fn with_pending(pending: Vec<Declaration>) -> Self {
        Self { pending }
    }

    /// Declarations collected so far, in submission order.
    pub fn pending(&self) -> &[Declaration] {
        &self.pending
    }

    /// Feeds one line of user input to the session.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let line = line.trim();

        if line.eq_ignore_ascii_case("done") {
            if self.pending.is_empty() {
                return SubmitOutcome::NothingToCommit;
            }
            return SubmitOutcome::Finished(std::mem::take(&mut self.pending));
        }

        let Some(declaration) = parse_declaration(line) else {
            return SubmitOutcome::Malformed;
        };

        if self.pending.len() >= MAX_GOALS_PER_USER {
            return SubmitOutcome::LimitReached;
        }

        self.pending.push(declaration.clone());
        SubmitOutcome::Added {
            declaration,
            count: self.pending.len(),
        }
    }
}

/// Parses a declaration line.
///
/// The first character must be a digit 1-9 and becomes the frequency; the
/// rest of the line, trimmed, is the name. `"2x Gym"` therefore parses as
/// frequency 2 with the name `"x Gym"`.
fn parse_declaration(line: &str) -> Option<Declaration> {
    let mut chars = line.chars();
    let frequency = chars.next()?.to_digit(10).filter(|d| *d >= 1)?;
    Declaration::new(frequency, chars.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(frequency: u32, name: &str) -> Declaration {
        Declaration::new(frequency, name).unwrap()
    }

    #[test]
    fn leading_digit_is_frequency_and_rest_is_name() {
        let mut session = DialogSession::start();

        let outcome = session.submit("2x Gym");
        assert_eq!(
            outcome,
            SubmitOutcome::Added {
                declaration: decl(2, "x Gym"),
                count: 1,
            }
        );
    }

    #[test]
    fn plain_frequency_and_name_parses() {
        let mut session = DialogSession::start();

        let outcome = session.submit("3 Read");
        assert_eq!(
            outcome,
            SubmitOutcome::Added {
                declaration: decl(3, "Read"),
                count: 1,
            }
        );
    }

    #[test]
    fn zero_frequency_is_malformed_and_does_not_mutate() {
        let mut session = DialogSession::start();

        assert_eq!(session.submit("0 Gym"), SubmitOutcome::Malformed);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn non_digit_lead_is_malformed_and_does_not_mutate() {
        let mut session = DialogSession::start();

        assert_eq!(session.submit("abc Gym"), SubmitOutcome::Malformed);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn missing_name_is_malformed() {
        let mut session = DialogSession::start();

        assert_eq!(session.submit("2"), SubmitOutcome::Malformed);
        assert_eq!(session.submit("2   "), SubmitOutcome::Malformed);
    }

    #[test]
    fn fifth_goal_is_rejected_and_list_stays_at_four() {
        let mut session = DialogSession::start();
        for line in ["1 Gym", "2 Read", "3 Run", "4 Cook"] {
            assert!(matches!(session.submit(line), SubmitOutcome::Added { .. }));
        }

        assert_eq!(session.submit("5 Swim"), SubmitOutcome::LimitReached);
        assert_eq!(session.pending().len(), 4);
    }

    #[test]
    fn done_with_nothing_pending_is_rejected() {
        let mut session = DialogSession::start();

        assert_eq!(session.submit("done"), SubmitOutcome::NothingToCommit);
    }

    #[test]
    fn done_drains_pending_in_submission_order() {
        let mut session = DialogSession::start();
        session.submit("2 Gym");
        session.submit("1 Read");

        let outcome = session.submit("done");
        assert_eq!(
            outcome,
            SubmitOutcome::Finished(vec![decl(2, "Gym"), decl(1, "Read")])
        );
        assert!(session.pending().is_empty());
    }

    #[test]
    fn done_is_case_insensitive() {
        let mut session = DialogSession::start();
        session.submit("2 Gym");

        assert!(matches!(
            session.submit("DONE"),
            SubmitOutcome::Finished(_)
        ));
    }

    #[test]
    fn with_pending_restores_a_drained_session() {
        let pending = vec![decl(2, "Gym")];
        let mut session = DialogSession::with_pending(pending.clone());
        assert_eq!(session.pending(), pending.as_slice());

        assert_eq!(session.submit("done"), SubmitOutcome::Finished(pending));
    }

    #[test]
    fn multidigit_line_takes_only_the_first_digit() {
        let mut session = DialogSession::start();

        let outcome = session.submit("12 Gym");
        assert_eq!(
            outcome,
            SubmitOutcome::Added {
                declaration: decl(1, "2 Gym"),
                count: 1,
            }
        );
    }
}
