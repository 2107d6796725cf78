//! Store port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Stores hold no business rules; every invariant is enforced by the
/// lifecycle service before a record reaches the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every stored task ordered by identifier.
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Inserts a new task and returns it with its assigned identifier.
    async fn insert(&self, task: &NewTask) -> TaskStoreResult<Task>;

    /// Overwrites the mutable fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn save(&self, task: &Task) -> TaskStoreResult<Task>;

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Counts tasks assigned to `user_id` that currently have `status`.
    async fn count_by_assignee_and_status(
        &self,
        user_id: UserId,
        status: TaskStatus,
    ) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
