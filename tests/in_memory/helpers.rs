//! Shared test helpers for in-memory integration tests.

use chrono::{Days, NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use task_engine::{
    config::EngineConfig,
    task::{
        adapters::memory::{InMemoryIdentityDirectory, InMemoryTaskStore, RecordingEventEmitter},
        domain::{NewTaskDraft, TaskPriority, UserId},
        ports::LifecycleEventEmitter,
        services::TaskLifecycleService,
    },
};

/// Service wired to in-memory adapters with a recording emitter.
pub type RecordingService = TaskLifecycleService<
    InMemoryTaskStore,
    InMemoryIdentityDirectory,
    RecordingEventEmitter,
    DefaultClock,
>;

/// Service plus handles to its adapters.
pub struct Engine {
    pub service: RecordingService,
    pub directory: InMemoryIdentityDirectory,
    pub emitter: RecordingEventEmitter,
}

/// Users 1, 2, and 3 are active in every fresh directory.
pub fn active_directory() -> InMemoryIdentityDirectory {
    InMemoryIdentityDirectory::with_active_users((1..=3).map(UserId::new))
}

/// Builds a service over fresh in-memory adapters and `emitter`.
pub fn service_with_emitter<E: LifecycleEventEmitter>(
    directory: &InMemoryIdentityDirectory,
    emitter: E,
) -> TaskLifecycleService<InMemoryTaskStore, InMemoryIdentityDirectory, E, DefaultClock> {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(directory.clone()),
        Arc::new(emitter),
        Arc::new(DefaultClock),
    )
    .with_policy(EngineConfig::default().lifecycle_policy())
}

/// Provides a fresh engine for each test.
#[fixture]
pub fn engine() -> Engine {
    let directory = active_directory();
    let emitter = RecordingEventEmitter::new();
    let service = service_with_emitter(&directory, emitter.clone());
    Engine {
        service,
        directory,
        emitter,
    }
}

/// Returns a date `days` after today in UTC.
pub fn days_from_today(days: u64) -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}

/// Draft created by user 1, assigned to user 2, due in a week.
pub fn weekly_draft() -> NewTaskDraft {
    NewTaskDraft::new(UserId::new(1), TaskPriority::Medium)
        .with_assignee(UserId::new(2))
        .with_deadline(days_from_today(7))
}
