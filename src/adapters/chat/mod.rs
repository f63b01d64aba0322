//! Chat adapters - the gateway between a chat transport and the core.

mod in_memory;
mod router;

pub use in_memory::RecordingReplySink;
pub use router::ChatRouter;
