//! Error types for task domain validation, state guards, and parsing.

use super::{TaskId, TaskStatus, UserId};
use chrono::NaiveDate;
use thiserror::Error;

/// Structurally invalid task input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// A draft carried a status; status is assigned by the server.
    #[error("status must be empty on creation, got {0}")]
    StatusSuppliedOnCreate(TaskStatus),

    /// A draft or proposal did not carry a deadline.
    #[error("deadline date is required")]
    MissingDeadline,

    /// The deadline does not fall strictly after the creation date.
    #[error("deadline date {deadline} must be after creation date {created}")]
    DeadlineNotAfterCreation {
        /// Creation date the deadline was compared against.
        created: NaiveDate,
        /// Rejected deadline.
        deadline: NaiveDate,
    },

    /// The task cannot be started because nobody is assigned to it.
    #[error("task {0} cannot be started, it has no assigned user")]
    StartWithoutAssignee(TaskId),

    /// The task cannot be completed because it lacks an assignee or deadline.
    #[error("task {0} cannot be completed, it needs an assigned user and a deadline")]
    CompleteWithoutAssigneeOrDeadline(TaskId),
}

/// Operation not permitted in the task's current state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStateError {
    /// A completed task may only be reopened, nothing else may change.
    #[error("cannot modify task {task_id} with status {status}")]
    Immutable {
        /// Task that rejected the change.
        task_id: TaskId,
        /// Stored status at the time of the attempt.
        status: TaskStatus,
    },

    /// The assignee already carries the maximum number of active tasks.
    #[error("work-in-progress limit exceeded ({limit}) for user {user_id}")]
    WorkInProgressLimitExceeded {
        /// Assignee whose limit was reached.
        user_id: UserId,
        /// Configured limit.
        limit: u64,
    },
}

/// Rejection of an update proposal by the task aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskUpdateError {
    /// The proposal would leave the task with inconsistent dates.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The task's state does not accept the proposal.
    #[error(transparent)]
    State(#[from] TaskStateError),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
