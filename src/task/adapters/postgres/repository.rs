//! `PostgreSQL` store implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskStoreError::Persistence`] when the pool cannot establish
/// its initial connections.
pub fn connect_pool(database_url: &str) -> TaskStoreResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(TaskStoreError::persistence)
}

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn insert(&self, task: &NewTask) -> TaskStoreResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn save(&self, task: &Task) -> TaskStoreResult<Task> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(task_id.value()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?
                .ok_or(TaskStoreError::NotFound(task_id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count_by_assignee_and_status(
        &self,
        user_id: UserId,
        status: TaskStatus,
    ) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .filter(tasks::assigned_user_id.eq(user_id.value()))
                .filter(tasks::task_status.eq(status.as_str()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskStoreError::persistence)?;
            u64::try_from(count).map_err(TaskStoreError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        creator_id: task.creator_id.value(),
        assigned_user_id: task.assigned_user_id.map(UserId::value),
        task_status: task.status.as_str().to_owned(),
        create_date: task.created_date,
        deadline_date: Some(task.deadline_date),
        priority: task.priority.as_str().to_owned(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        creator_id: task.creator_id().value(),
        assigned_user_id: task.assigned_user_id().map(UserId::value),
        task_status: task.status().as_str().to_owned(),
        deadline_date: task.deadline_date(),
        priority: task.priority().as_str().to_owned(),
        done_at: task.done_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        creator_id,
        assigned_user_id,
        task_status,
        create_date,
        deadline_date,
        priority,
        done_at,
    } = row;

    let status =
        TaskStatus::try_from(task_status.as_str()).map_err(TaskStoreError::persistence)?;
    let priority =
        TaskPriority::try_from(priority.as_str()).map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        creator_id: UserId::new(creator_id),
        assigned_user_id: assigned_user_id.map(UserId::new),
        status,
        created_date: create_date,
        deadline_date,
        priority,
        done_at,
    }))
}
