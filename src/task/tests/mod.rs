//! Unit tests for the task lifecycle context.

use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;


/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(super) fn at_morning_of(date: NaiveDate) -> Self {
        let instant = date.and_hms_opt(9, 30, 0).expect("valid time of day");
        Self(Utc.from_utc_datetime(&instant))
    }

    pub(super) const fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub(super) fn today() -> NaiveDate {
    date(2026, 3, 10)
}

pub(super) fn stored_task(
    id: i64,
    assignee: Option<i64>,
    status: TaskStatus,
    deadline: Option<NaiveDate>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        creator_id: UserId::new(1),
        assigned_user_id: assignee.map(UserId::new),
        status,
        created_date: date(2026, 3, 1),
        deadline_date: deadline,
        priority: TaskPriority::Medium,
        done_at: (status == TaskStatus::Done)
            .then(|| Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).single())
            .flatten(),
    })
}
