//! Lifecycle stream consumer that notifies task creators.

use crate::task::{
    adapters::stream::LifecycleEventReceiver,
    domain::{TaskLifecycleEvent, UserId},
    ports::{IdentityError, IdentityValidator, UserLookup},
    services::LifecyclePolicy,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// What happened to a single lifecycle event.
#[derive(Debug, Clone)]
pub enum NotificationOutcome {
    /// The creator resolved and the notification was logged.
    Sent {
        /// Recipient.
        creator_id: UserId,
    },
    /// The creator no longer resolves; nothing was sent.
    SkippedUnknownCreator {
        /// Creator that failed to resolve.
        creator_id: UserId,
    },
    /// The identity lookup failed; nothing was sent.
    Failed {
        /// Creator being looked up.
        creator_id: UserId,
        /// Lookup failure.
        error: IdentityError,
    },
}

/// Counts gathered while draining a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerSummary {
    /// Notifications logged.
    pub sent: usize,
    /// Events skipped because the creator did not resolve.
    pub skipped: usize,
    /// Events skipped because the lookup failed.
    pub failed: usize,
}

impl ListenerSummary {
    fn record(&mut self, outcome: &NotificationOutcome) {
        match outcome {
            NotificationOutcome::Sent { .. } => self.sent += 1,
            NotificationOutcome::SkippedUnknownCreator { .. } => self.skipped += 1,
            NotificationOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Total events handled.
    #[must_use]
    pub const fn handled(&self) -> usize {
        self.sent + self.skipped + self.failed
    }
}

/// Consumer of create, update, and delete lifecycle events.
#[derive(Clone)]
pub struct TaskEventListener<I>
where
    I: IdentityValidator,
{
    identity: Arc<I>,
    identity_timeout: Duration,
}

impl<I> TaskEventListener<I>
where
    I: IdentityValidator,
{
    /// Creates a listener resolving creators through `identity`, bounding
    /// each lookup by [`LifecyclePolicy::DEFAULT_IDENTITY_TIMEOUT`].
    #[must_use]
    pub const fn new(identity: Arc<I>) -> Self {
        Self {
            identity,
            identity_timeout: LifecyclePolicy::DEFAULT_IDENTITY_TIMEOUT,
        }
    }

    /// Replaces the bound on a single creator lookup.
    #[must_use]
    pub const fn with_identity_timeout(mut self, timeout: Duration) -> Self {
        self.identity_timeout = timeout;
        self
    }

    /// Handles one event.
    pub async fn handle(&self, event: &TaskLifecycleEvent) -> NotificationOutcome {
        let payload = event.payload();
        let creator_id = payload.creator_id;
        info!(
            topic = event.topic(),
            event_id = %event.event_id(),
            task_id = %payload.id,
            status = %payload.task_status,
            "lifecycle event received"
        );

        let timeout = self.identity_timeout;
        let lookup = tokio::time::timeout(timeout, self.identity.check(creator_id))
            .await
            .map_err(|_elapsed| IdentityError::Timeout {
                user_id: creator_id,
                timeout,
            })
            .and_then(|result| result);

        match lookup {
            Ok(UserLookup::Usable) => {
                info!(
                    creator_id = %creator_id,
                    task_id = %payload.id,
                    topic = event.topic(),
                    "notification sent to task creator"
                );
                NotificationOutcome::Sent { creator_id }
            }
            Ok(UserLookup::NotFound) => {
                warn!(
                    creator_id = %creator_id,
                    task_id = %payload.id,
                    "task creator not found, notification skipped"
                );
                NotificationOutcome::SkippedUnknownCreator { creator_id }
            }
            Err(error) => {
                warn!(
                    creator_id = %creator_id,
                    task_id = %payload.id,
                    error = %error,
                    "creator lookup failed, notification skipped"
                );
                NotificationOutcome::Failed { creator_id, error }
            }
        }
    }

    /// Drains `receiver` until every sender has been dropped.
    pub async fn run(&self, mut receiver: LifecycleEventReceiver) -> ListenerSummary {
        let mut summary = ListenerSummary::default();
        while let Some(event) = receiver.recv().await {
            let outcome = self.handle(&event).await;
            summary.record(&outcome);
        }
        info!(
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "lifecycle stream closed"
        );
        summary
    }
}
