//! Bounded channel emitter feeding in-process lifecycle consumers.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::task::{
    domain::TaskLifecycleEvent,
    ports::{EmitError, LifecycleEventEmitter},
};

/// Receiving half of a lifecycle channel.
pub type LifecycleEventReceiver = mpsc::Receiver<TaskLifecycleEvent>;

/// Emitter that pushes events onto a bounded `tokio` channel.
///
/// Sending never waits: a full buffer drops the event and reports
/// [`EmitError::Full`], which gives at-most-once delivery.
#[derive(Debug, Clone)]
pub struct ChannelEventEmitter {
    sender: mpsc::Sender<TaskLifecycleEvent>,
}

impl ChannelEventEmitter {
    /// Creates an emitter and the receiver consumers read from.
    ///
    /// A zero `capacity` is raised to one, the smallest buffer `tokio`
    /// accepts.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, LifecycleEventReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl LifecycleEventEmitter for ChannelEventEmitter {
    fn emit(&self, event: &TaskLifecycleEvent) -> Result<(), EmitError> {
        self.sender
            .try_send(event.clone())
            .map_err(|err| match err {
                TrySendError::Full(dropped) => EmitError::Full(dropped.kind()),
                TrySendError::Closed(dropped) => EmitError::Closed(dropped.kind()),
            })
    }
}
