//! Emitter that writes lifecycle events to the log.

use crate::task::{
    domain::TaskLifecycleEvent,
    ports::{EmitError, LifecycleEventEmitter},
};

/// Emitter that records each event as a structured `info` log line.
///
/// Stands in for a broker producer when no consumer runs in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventEmitter;

impl LifecycleEventEmitter for LogEventEmitter {
    fn emit(&self, event: &TaskLifecycleEvent) -> Result<(), EmitError> {
        let payload =
            serde_json::to_string(event.payload()).map_err(|err| EmitError::Other(err.to_string()))?;
        tracing::info!(
            topic = event.topic(),
            event_id = %event.event_id(),
            task_id = %event.payload().id,
            %payload,
            "lifecycle event"
        );
        Ok(())
    }
}
