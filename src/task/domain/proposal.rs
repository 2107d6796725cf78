//! Client-supplied task values: creation drafts and update proposals.
//!
//! Both are immutable inputs. The lifecycle service reads the stored record,
//! computes the next [`super::Task`] value from a proposal, and saves it whole.

use super::{TaskPriority, TaskStatus, TaskValidationError, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Draft of a task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskDraft {
    creator_id: UserId,
    assigned_user_id: Option<UserId>,
    status: Option<TaskStatus>,
    deadline_date: Option<NaiveDate>,
    priority: TaskPriority,
}

impl NewTaskDraft {
    /// Creates a draft with the required creator and priority.
    #[must_use]
    pub const fn new(creator_id: UserId, priority: TaskPriority) -> Self {
        Self {
            creator_id,
            assigned_user_id: None,
            status: None,
            deadline_date: None,
            priority,
        }
    }

    /// Sets the assigned user.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }

    /// Sets the deadline date.
    #[must_use]
    pub const fn with_deadline(mut self, deadline_date: NaiveDate) -> Self {
        self.deadline_date = Some(deadline_date);
        self
    }

    /// Sets a client status. Creation rejects drafts that carry one.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
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

    /// Returns the client-supplied status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
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

    /// Checks the structural rules that do not depend on other services.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::StatusSuppliedOnCreate`] when a status
    /// is present, otherwise [`TaskValidationError::MissingDeadline`] when no
    /// deadline is set.
    pub const fn ensure_well_formed(&self) -> Result<NaiveDate, TaskValidationError> {
        if let Some(status) = self.status {
            return Err(TaskValidationError::StatusSuppliedOnCreate(status));
        }
        match self.deadline_date {
            Some(deadline) => Ok(deadline),
            None => Err(TaskValidationError::MissingDeadline),
        }
    }
}

/// Proposed replacement of a stored task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    creator_id: UserId,
    assigned_user_id: Option<UserId>,
    status: TaskStatus,
    created_date: NaiveDate,
    deadline_date: NaiveDate,
}

impl TaskUpdate {
    /// Creates a proposal with every required field.
    #[must_use]
    pub const fn new(
        creator_id: UserId,
        status: TaskStatus,
        created_date: NaiveDate,
        deadline_date: NaiveDate,
    ) -> Self {
        Self {
            creator_id,
            assigned_user_id: None,
            status,
            created_date,
            deadline_date,
        }
    }

    /// Sets the assigned user.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }

    /// Returns the proposed creator.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the proposed assignee, if any.
    #[must_use]
    pub const fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }

    /// Returns the proposed status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation date the proposal was built against.
    #[must_use]
    pub const fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    /// Returns the proposed deadline.
    #[must_use]
    pub const fn deadline_date(&self) -> NaiveDate {
        self.deadline_date
    }

    /// Checks that the proposed deadline falls after the proposed creation date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DeadlineNotAfterCreation`] otherwise.
    pub fn ensure_dates_ordered(&self) -> Result<(), TaskValidationError> {
        ensure_deadline_after(self.created_date, self.deadline_date)
    }
}

/// Rejects a deadline that is not strictly after the creation date.
pub(crate) fn ensure_deadline_after(
    created: NaiveDate,
    deadline: NaiveDate,
) -> Result<(), TaskValidationError> {
    if deadline <= created {
        return Err(TaskValidationError::DeadlineNotAfterCreation { created, deadline });
    }
    Ok(())
}
