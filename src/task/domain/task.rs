//! Task aggregate root and its lifecycle transitions.

use super::{
    NewTaskDraft, TaskId, TaskPriority, TaskStateError, TaskStatus, TaskUpdate, TaskUpdateError,
    TaskValidationError, UserId, proposal::ensure_deadline_after,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Validated task record awaiting its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// User who opened the task.
    pub creator_id: UserId,
    /// User responsible for the task, if any.
    pub assigned_user_id: Option<UserId>,
    /// Initial status, always [`TaskStatus::Created`].
    pub status: TaskStatus,
    /// Server-assigned creation date.
    pub created_date: NaiveDate,
    /// Deadline, strictly after `created_date`.
    pub deadline_date: NaiveDate,
    /// Priority classification.
    pub priority: TaskPriority,
}

impl NewTask {
    /// Builds the initial record for a draft created on `today`.
    ///
    /// The draft must already have passed
    /// [`NewTaskDraft::ensure_well_formed`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DeadlineNotAfterCreation`] when the
    /// deadline is not after `today`, or the structural errors of
    /// [`NewTaskDraft::ensure_well_formed`].
    pub fn from_draft(draft: &NewTaskDraft, today: NaiveDate) -> Result<Self, TaskValidationError> {
        let deadline_date = draft.ensure_well_formed()?;
        ensure_deadline_after(today, deadline_date)?;
        Ok(Self {
            creator_id: draft.creator_id(),
            assigned_user_id: draft.assigned_user_id(),
            status: TaskStatus::Created,
            created_date: today,
            deadline_date,
            priority: draft.priority(),
        })
    }

    /// Attaches the identifier assigned by a store.
    #[must_use]
    pub const fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            creator_id: self.creator_id,
            assigned_user_id: self.assigned_user_id,
            status: self.status,
            created_date: self.created_date,
            deadline_date: Some(self.deadline_date),
            priority: self.priority,
            done_at: None,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    creator_id: UserId,
    assigned_user_id: Option<UserId>,
    status: TaskStatus,
    created_date: NaiveDate,
    deadline_date: Option<NaiveDate>,
    priority: TaskPriority,
    done_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted creator.
    pub creator_id: UserId,
    /// Persisted assignee, if any.
    pub assigned_user_id: Option<UserId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation date.
    pub created_date: NaiveDate,
    /// Persisted deadline. Legacy rows may lack one.
    pub deadline_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            creator_id: data.creator_id,
            assigned_user_id: data.assigned_user_id,
            status: data.status,
            created_date: data.created_date,
            deadline_date: data.deadline_date,
            priority: data.priority,
            done_at: data.done_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation date.
    #[must_use]
    pub const fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the completion timestamp. Present only while the task is done.
    #[must_use]
    pub const fn done_at(&self) -> Option<DateTime<Utc>> {
        self.done_at
    }

    /// Returns `true` when the proposal changes nothing but the status, and
    /// that status is [`TaskStatus::InProgress`].
    #[must_use]
    pub fn is_pure_reopen(&self, proposal: &TaskUpdate) -> bool {
        proposal.status() == TaskStatus::InProgress
            && proposal.created_date() == self.created_date
            && Some(proposal.deadline_date()) == self.deadline_date
            && proposal.creator_id() == self.creator_id
            && proposal.assigned_user_id() == self.assigned_user_id
    }

    /// Applies an update proposal.
    ///
    /// A done task accepts only a pure reopen, which moves it back to
    /// [`TaskStatus::InProgress`]. Any other task takes the proposal's
    /// creator, assignee, status, and deadline. The stored creation date never
    /// changes, so the new deadline must fall after it. The completion
    /// timestamp is cleared whenever the resulting status is not done, and
    /// stamped with `now` when the proposal moves the task to done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStateError::Immutable`] when a done task receives
    /// anything other than a pure reopen, and
    /// [`TaskValidationError::DeadlineNotAfterCreation`] when the proposed
    /// deadline is not after the stored creation date.
    pub fn apply_update(
        &mut self,
        proposal: &TaskUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), TaskUpdateError> {
        if self.status == TaskStatus::Done {
            if !self.is_pure_reopen(proposal) {
                return Err(TaskStateError::Immutable {
                    task_id: self.id,
                    status: self.status,
                }
                .into());
            }
            self.reopen();
            return Ok(());
        }

        ensure_deadline_after(self.created_date, proposal.deadline_date())?;
        self.creator_id = proposal.creator_id();
        self.assigned_user_id = proposal.assigned_user_id();
        self.deadline_date = Some(proposal.deadline_date());
        self.status = proposal.status();
        self.done_at = match self.status {
            TaskStatus::Done => Some(now),
            TaskStatus::Created | TaskStatus::InProgress => None,
        };
        Ok(())
    }

    /// Returns the assignee required to start the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::StartWithoutAssignee`] when nobody is
    /// assigned.
    pub const fn assignee_for_start(&self) -> Result<UserId, TaskValidationError> {
        match self.assigned_user_id {
            Some(user_id) => Ok(user_id),
            None => Err(TaskValidationError::StartWithoutAssignee(self.id)),
        }
    }

    /// Returns the assignee required to complete the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::CompleteWithoutAssigneeOrDeadline`]
    /// when the assignee or the deadline is missing.
    pub const fn assignee_for_completion(&self) -> Result<UserId, TaskValidationError> {
        match (self.assigned_user_id, self.deadline_date) {
            (Some(user_id), Some(_)) => Ok(user_id),
            _ => Err(TaskValidationError::CompleteWithoutAssigneeOrDeadline(
                self.id,
            )),
        }
    }

    /// Moves the task to [`TaskStatus::InProgress`].
    ///
    /// Starting a done task reopens it, so the completion timestamp is
    /// cleared.
    pub fn mark_in_progress(&mut self) {
        self.reopen();
    }

    /// Moves the task to [`TaskStatus::Done`] at `now`.
    pub fn mark_done(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Done;
        self.done_at = Some(now);
    }

    fn reopen(&mut self) {
        self.status = TaskStatus::InProgress;
        self.done_at = None;
    }
}
