//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Creator identifier.
    pub creator_id: i64,
    /// Assignee identifier.
    pub assigned_user_id: Option<i64>,
    /// Lifecycle status.
    pub task_status: String,
    /// Creation date.
    pub create_date: NaiveDate,
    /// Deadline date.
    pub deadline_date: Option<NaiveDate>,
    /// Priority classification.
    pub priority: String,
    /// Completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}

/// Insert model for task records. The identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Creator identifier.
    pub creator_id: i64,
    /// Assignee identifier.
    pub assigned_user_id: Option<i64>,
    /// Lifecycle status.
    pub task_status: String,
    /// Creation date.
    pub create_date: NaiveDate,
    /// Deadline date.
    pub deadline_date: Option<NaiveDate>,
    /// Priority classification.
    pub priority: String,
}

/// Full overwrite of a task's mutable columns.
///
/// `None` values are written as `NULL` so clearing an assignee or a
/// completion timestamp reaches the database.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Creator identifier.
    pub creator_id: i64,
    /// Assignee identifier.
    pub assigned_user_id: Option<i64>,
    /// Lifecycle status.
    pub task_status: String,
    /// Deadline date.
    pub deadline_date: Option<NaiveDate>,
    /// Priority classification.
    pub priority: String,
    /// Completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}
