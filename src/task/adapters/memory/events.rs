//! Recording lifecycle emitter for tests.

use std::sync::{Arc, Mutex, PoisonError};

use crate::task::{
    domain::TaskLifecycleEvent,
    ports::{EmitError, LifecycleEventEmitter},
};

/// Emitter that keeps every accepted event in memory.
///
/// [`RecordingEventEmitter::reject_with`] makes it refuse events, which lets
/// tests check that emission failures never undo a committed mutation.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventEmitter {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<TaskLifecycleEvent>,
    rejection: Option<EmitError>,
}

impl RecordingEventEmitter {
    /// Creates an emitter with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the accepted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<TaskLifecycleEvent> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }

    /// Makes every subsequent emission fail with `error`.
    pub fn reject_with(&self, error: EmitError) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rejection = Some(error);
    }
}

impl LifecycleEventEmitter for RecordingEventEmitter {
    fn emit(&self, event: &TaskLifecycleEvent) -> Result<(), EmitError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(rejection) = state.rejection.clone() {
            return Err(rejection);
        }
        state.events.push(event.clone());
        Ok(())
    }
}
