//! Service layer for task creation, status transitions, and removal.

use super::{
    error::{TaskLifecycleError, TaskLifecycleResult},
    locks::AssigneeLocks,
};
use crate::task::{
    domain::{
        NewTask, NewTaskDraft, Task, TaskEventKind, TaskId, TaskLifecycleEvent, TaskStateError,
        TaskStatus, TaskUpdate, UserId,
    },
    ports::{IdentityError, IdentityValidator, LifecycleEventEmitter, TaskStore, UserLookup},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tunable limits applied by the lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// Maximum number of tasks one assignee may have in progress.
    pub in_progress_limit: u64,
    /// Upper bound on a single identity lookup.
    pub identity_timeout: Duration,
}

impl LifecyclePolicy {
    /// Default work-in-progress limit per assignee.
    pub const DEFAULT_IN_PROGRESS_LIMIT: u64 = 4;
    /// Default identity lookup bound.
    pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(2);
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            in_progress_limit: Self::DEFAULT_IN_PROGRESS_LIMIT,
            identity_timeout: Self::DEFAULT_IDENTITY_TIMEOUT,
        }
    }
}

/// Task lifecycle orchestration service.
///
/// Holds no task state of its own; every operation loads the stored record,
/// applies the domain rules, saves the result, and then emits a lifecycle
/// event. Emission failures are logged and never undo the store write.
#[derive(Clone)]
pub struct TaskLifecycleService<S, I, E, C>
where
    S: TaskStore,
    I: IdentityValidator,
    E: LifecycleEventEmitter,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    identity: Arc<I>,
    emitter: Arc<E>,
    clock: Arc<C>,
    policy: LifecyclePolicy,
    assignee_locks: Arc<AssigneeLocks>,
}

impl<S, I, E, C> TaskLifecycleService<S, I, E, C>
where
    S: TaskStore,
    I: IdentityValidator,
    E: LifecycleEventEmitter,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default [`LifecyclePolicy`].
    #[must_use]
    pub fn new(store: Arc<S>, identity: Arc<I>, emitter: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            store,
            identity,
            emitter,
            clock,
            policy: LifecyclePolicy::default(),
            assignee_locks: Arc::new(AssigneeLocks::new()),
        }
    }

    /// Replaces the service policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    /// Creates a task from a client draft.
    ///
    /// The task starts in [`TaskStatus::Created`] with today's date as its
    /// creation date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the draft carries a
    /// status, lacks a deadline, or has a deadline that is not after today;
    /// [`TaskLifecycleError::UserNotFound`] when the creator or assignee does
    /// not resolve; and dependency or storage errors from the ports.
    pub async fn create(&self, draft: NewTaskDraft) -> TaskLifecycleResult<Task> {
        draft.ensure_well_formed()?;
        self.ensure_user_usable(Some(draft.creator_id())).await?;
        self.ensure_user_usable(draft.assigned_user_id()).await?;

        let today = self.clock.utc().date_naive();
        let new_task = NewTask::from_draft(&draft, today)?;
        let task = self.store.insert(&new_task).await?;

        info!(task_id = %task.id(), creator_id = %task.creator_id(), "task created");
        self.publish(TaskEventKind::Created, &task);
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, or storage errors.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        debug!(task_id = %id, "finding task");
        self.load(id).await
    }

    /// Lists every stored task.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the task store.
    pub async fn find_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.store.list_all().await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Applies an update proposal to a stored task.
    ///
    /// A done task only accepts a pure reopen: the proposal moves it to
    /// [`TaskStatus::InProgress`] and leaves every other field as stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Validation`] when the proposed deadline is
    /// not after the proposed or the stored creation date,
    /// [`TaskLifecycleError::UserNotFound`] for unresolved users,
    /// [`TaskLifecycleError::IllegalState`] for changes to a done task, and
    /// dependency or storage errors from the ports.
    pub async fn update(&self, id: TaskId, proposal: TaskUpdate) -> TaskLifecycleResult<Task> {
        let mut task = self.load(id).await?;
        proposal.ensure_dates_ordered()?;
        self.ensure_user_usable(Some(proposal.creator_id())).await?;
        self.ensure_user_usable(proposal.assigned_user_id()).await?;

        let previous_status = task.status();
        task.apply_update(&proposal, self.clock.utc())?;
        let saved = self.store.save(&task).await?;

        info!(
            task_id = %saved.id(),
            from = %previous_status,
            to = %saved.status(),
            "task updated"
        );
        self.publish(TaskEventKind::Updated, &saved);
        Ok(saved)
    }

    /// Moves an assigned task to [`TaskStatus::InProgress`].
    ///
    /// The task is re-read once the per-assignee lock is held, and the count
    /// and status write happen under that lock, so concurrent starts for one
    /// assignee within this service cannot overshoot the limit. A task
    /// reassigned while waiting is retried under its new assignee's lock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Validation`] when nobody is assigned,
    /// [`TaskLifecycleError::UserNotFound`] when the assignee does not
    /// resolve, [`TaskLifecycleError::IllegalState`] when the assignee is at
    /// the work-in-progress limit, and dependency or storage errors.
    pub async fn start(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut assignee = self.load(id).await?.assignee_for_start()?;
        let (mut task, _assignee_guard) = loop {
            self.ensure_user_usable(Some(assignee)).await?;
            let guard = self.assignee_locks.acquire(assignee).await;

            let current = self.load(id).await?;
            let current_assignee = current.assignee_for_start()?;
            if current_assignee == assignee {
                break (current, guard);
            }
            debug!(
                task_id = %id,
                from = %assignee,
                to = %current_assignee,
                "task reassigned while waiting to start"
            );
            assignee = current_assignee;
        };
        self.ensure_below_in_progress_limit(assignee).await?;

        task.mark_in_progress();
        let saved = self.store.save(&task).await?;

        info!(task_id = %saved.id(), assignee_id = %assignee, "task started");
        self.publish(TaskEventKind::Updated, &saved);
        Ok(saved)
    }

    /// Moves an assigned task with a deadline to [`TaskStatus::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Validation`] when the assignee or
    /// deadline is missing, [`TaskLifecycleError::UserNotFound`] when the
    /// assignee does not resolve, and dependency or storage errors.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load(id).await?;
        let assignee = task.assignee_for_completion()?;
        self.ensure_user_usable(Some(assignee)).await?;

        task.mark_done(self.clock.utc());
        let saved = self.store.save(&task).await?;

        info!(task_id = %saved.id(), assignee_id = %assignee, "task completed");
        self.publish(TaskEventKind::Updated, &saved);
        Ok(saved)
    }

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, or storage errors.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.load(id).await?;
        self.store.delete(id).await?;

        info!(task_id = %id, "task deleted");
        self.publish(TaskEventKind::Deleted, &task);
        Ok(())
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.store
            .get(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }

    async fn ensure_below_in_progress_limit(&self, assignee: UserId) -> TaskLifecycleResult<()> {
        let active = self
            .store
            .count_by_assignee_and_status(assignee, TaskStatus::InProgress)
            .await?;
        let limit = self.policy.in_progress_limit;
        if active >= limit {
            warn!(assignee_id = %assignee, active, limit, "work-in-progress limit reached");
            return Err(TaskStateError::WorkInProgressLimitExceeded {
                user_id: assignee,
                limit,
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_user_usable(&self, user_id: Option<UserId>) -> TaskLifecycleResult<()> {
        let Some(user_id) = user_id else {
            return Ok(());
        };

        let timeout = self.policy.identity_timeout;
        let lookup = tokio::time::timeout(timeout, self.identity.check(user_id))
            .await
            .map_err(|_elapsed| IdentityError::Timeout { user_id, timeout })
            .and_then(|result| result)
            .inspect_err(|err| warn!(user_id = %user_id, error = %err, "identity lookup failed"))?;

        match lookup {
            UserLookup::Usable => Ok(()),
            UserLookup::NotFound => Err(TaskLifecycleError::UserNotFound(user_id)),
        }
    }

    fn publish(&self, kind: TaskEventKind, task: &Task) {
        let event = TaskLifecycleEvent::new(kind, task, self.clock.utc());
        if let Err(err) = self.emitter.emit(&event) {
            warn!(
                task_id = %task.id(),
                topic = event.topic(),
                error = %err,
                "lifecycle event dropped"
            );
        }
    }
}
