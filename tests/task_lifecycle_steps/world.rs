//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use task_engine::task::{
    adapters::memory::{InMemoryIdentityDirectory, InMemoryTaskStore, RecordingEventEmitter},
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<
    InMemoryTaskStore,
    InMemoryIdentityDirectory,
    RecordingEventEmitter,
    DefaultClock,
>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub directory: InMemoryIdentityDirectory,
    pub emitter: RecordingEventEmitter,
    pub current_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with an empty store and directory.
    #[must_use]
    pub fn new() -> Self {
        let directory = InMemoryIdentityDirectory::new();
        let emitter = RecordingEventEmitter::new();
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(directory.clone()),
            Arc::new(emitter.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            directory,
            emitter,
            current_task: None,
            last_result: None,
        }
    }

    /// Records an operation result, tracking the task on success.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref task) = result {
            self.current_task = Some(task.clone());
        }
        self.last_result = Some(result);
    }

    /// Returns the task the scenario is acting on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Returns a date `days` after today in UTC.
pub fn days_from_today(days: u64) -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
