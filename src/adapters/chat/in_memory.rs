//! In-memory reply sink for tests and local runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::ports::{ChatError, Reply, ReplySink};

/// Reply sink that records every delivery instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingReplySink {
    sent: Mutex<Vec<(UserId, Reply)>>,
}

impl RecordingReplySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub fn sent(&self) -> Vec<(UserId, Reply)> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recent reply delivered to `user_id`, if any.
    pub fn last_for(&self, user_id: UserId) -> Option<Reply> {
        self.sent()
            .into_iter()
            .rev()
            .find(|(to, _)| *to == user_id)
            .map(|(_, reply)| reply)
    }
}

#[async_trait]
impl ReplySink for RecordingReplySink {
    async fn send(&self, user_id: UserId, reply: Reply) -> Result<(), ChatError> {
        match self.sent.lock() {
            Ok(mut guard) => guard.push((user_id, reply)),
            Err(poisoned) => poisoned.into_inner().push((user_id, reply)),
        }
        Ok(())
    }
}
