//! Lifecycle stream adapters.

mod channel;
mod log_emitter;

pub use channel::{ChannelEventEmitter, LifecycleEventReceiver};
pub use log_emitter::LogEventEmitter;
