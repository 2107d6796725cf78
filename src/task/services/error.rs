//! Service-level error taxonomy for task lifecycle operations.

use crate::task::{
    domain::{TaskId, TaskStateError, TaskUpdateError, TaskValidationError, UserId},
    ports::{IdentityError, TaskStoreError},
};
use thiserror::Error;

/// Stable, machine-distinguishable category of a lifecycle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A task or referenced user does not exist.
    NotFound,
    /// The input is structurally invalid.
    Validation,
    /// The operation is not allowed in the task's current state.
    IllegalState,
    /// The identity authority could not answer.
    Dependency,
    /// The task store failed.
    Storage,
}

impl ErrorKind {
    /// Returns the canonical name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::IllegalState => "illegal_state",
            Self::Dependency => "dependency",
            Self::Storage => "storage",
        }
    }

    /// Returns `true` when the caller caused the failure.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::NotFound | Self::Validation | Self::IllegalState)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The requested task does not exist.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// A referenced user does not exist or is not usable.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The task's state does not permit the operation.
    #[error(transparent)]
    IllegalState(#[from] TaskStateError),

    /// The identity authority failed to answer.
    #[error(transparent)]
    Dependency(#[from] IdentityError),

    /// The task store failed.
    #[error(transparent)]
    Storage(TaskStoreError),
}

impl TaskLifecycleError {
    /// Returns the stable category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::IllegalState(_) => ErrorKind::IllegalState,
            Self::Dependency(_) => ErrorKind::Dependency,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<TaskStoreError> for TaskLifecycleError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::TaskNotFound(id),
            TaskStoreError::Persistence(_) => Self::Storage(err),
        }
    }
}

impl From<TaskUpdateError> for TaskLifecycleError {
    fn from(err: TaskUpdateError) -> Self {
        match err {
            TaskUpdateError::Validation(inner) => Self::Validation(inner),
            TaskUpdateError::State(inner) => Self::IllegalState(inner),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
