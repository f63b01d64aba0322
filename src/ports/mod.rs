//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod chat;
mod goal_store;

pub use chat::{
    ChatAction, ChatCommand, ChatError, InboundEvent, InboundKind, Reply, ReplyAction, ReplySink,
};
pub use goal_store::GoalStore;
