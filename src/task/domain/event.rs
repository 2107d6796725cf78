//! Lifecycle events published after committed task mutations.

use super::{Task, TaskId, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of committed task mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// A task was inserted.
    Created,
    /// A task was updated, started, or completed.
    Updated,
    /// A task was removed.
    Deleted,
}

impl TaskEventKind {
    /// Returns the stream topic consumers subscribe to for this kind.
    #[must_use]
    pub const fn topic(self) -> &'static str {
        match self {
            Self::Created => "task-created",
            Self::Updated => "task-updated",
            Self::Deleted => "task-deleted",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.topic())
    }
}

/// Flat, stream-safe projection of a task.
///
/// Dates are epoch milliseconds at UTC midnight and the completion timestamp
/// is epoch milliseconds, matching what the notification consumer parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEventPayload {
    /// Task identifier.
    pub id: TaskId,
    /// Creator identifier.
    pub creator_id: UserId,
    /// Assignee identifier, if any.
    pub assigned_user_id: Option<UserId>,
    /// Status in storage representation.
    pub task_status: String,
    /// Creation date as epoch milliseconds.
    pub create_date_time: i64,
    /// Deadline as epoch milliseconds, if any.
    pub deadline_date: Option<i64>,
    /// Priority in storage representation.
    pub priority: String,
    /// Completion timestamp as epoch milliseconds, if any.
    pub done_date_time: Option<i64>,
}

impl From<&Task> for TaskEventPayload {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            creator_id: task.creator_id(),
            assigned_user_id: task.assigned_user_id(),
            task_status: task.status().as_str().to_owned(),
            create_date_time: date_to_epoch_millis(task.created_date()),
            deadline_date: task.deadline_date().map(date_to_epoch_millis),
            priority: task.priority().as_str().to_owned(),
            done_date_time: task.done_at().map(|done_at| done_at.timestamp_millis()),
        }
    }
}

fn date_to_epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Event published to the lifecycle stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLifecycleEvent {
    event_id: Uuid,
    kind: TaskEventKind,
    occurred_at: DateTime<Utc>,
    payload: TaskEventPayload,
}

impl TaskLifecycleEvent {
    /// Creates an event describing `task` after a mutation of `kind`.
    #[must_use]
    pub fn new(kind: TaskEventKind, task: &Task, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            occurred_at,
            payload: TaskEventPayload::from(task),
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Returns the mutation kind.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        self.kind
    }

    /// Returns the topic the event belongs to.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        self.kind.topic()
    }

    /// Returns when the mutation was committed.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the task projection.
    #[must_use]
    pub const fn payload(&self) -> &TaskEventPayload {
        &self.payload
    }
}
