//! Emitter port for the task lifecycle stream.

use crate::task::domain::{TaskEventKind, TaskLifecycleEvent};
use thiserror::Error;

/// Fire-and-forget publisher of lifecycle events.
///
/// Implementations must not block: the lifecycle service calls `emit` after
/// the store write has committed and only logs a failure.
#[cfg_attr(test, mockall::automock)]
pub trait LifecycleEventEmitter: Send + Sync {
    /// Hands an event to the stream.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError`] when the event could not be accepted.
    fn emit(&self, event: &TaskLifecycleEvent) -> Result<(), EmitError>;
}

/// Errors returned by lifecycle event emitters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmitError {
    /// The stream buffer is full.
    #[error("lifecycle stream is full, dropped {0} event")]
    Full(TaskEventKind),

    /// No consumer is attached to the stream anymore.
    #[error("lifecycle stream is closed, dropped {0} event")]
    Closed(TaskEventKind),

    /// The emitter failed for another reason.
    #[error("lifecycle emitter failure: {0}")]
    Other(String),
}
