//! Dialog module - the multi-turn goal-setup state machine.

mod session;

pub use session::{DialogSession, SubmitOutcome};
