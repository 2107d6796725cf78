//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, days_from_today, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_engine::task::{
    adapters::memory::DirectoryUserStatus,
    domain::{NewTaskDraft, TaskPriority, UserId},
};

#[given("an active user {user_id:i64}")]
fn active_user(world: &mut TaskLifecycleWorld, user_id: i64) {
    world
        .directory
        .set_user(UserId::new(user_id), DirectoryUserStatus::Active);
}

#[given("a banned user {user_id:i64}")]
fn banned_user(world: &mut TaskLifecycleWorld, user_id: i64) {
    world
        .directory
        .set_user(UserId::new(user_id), DirectoryUserStatus::Banned);
}

#[given("user {assignee:i64} already has {count:u32} tasks in progress")]
fn assignee_has_tasks_in_progress(
    world: &mut TaskLifecycleWorld,
    assignee: i64,
    count: u32,
) -> Result<(), eyre::Report> {
    for _ in 0..count {
        let draft = NewTaskDraft::new(UserId::new(assignee), TaskPriority::Low)
            .with_assignee(UserId::new(assignee))
            .with_deadline(days_from_today(14));
        let task = run_async(world.service.create(draft)).wrap_err("create background task")?;
        run_async(world.service.start(task.id())).wrap_err("start background task")?;
    }
    Ok(())
}

#[given("a task created by user {creator:i64} and assigned to user {assignee:i64}")]
fn task_created(
    world: &mut TaskLifecycleWorld,
    creator: i64,
    assignee: i64,
) -> Result<(), eyre::Report> {
    let draft = NewTaskDraft::new(UserId::new(creator), TaskPriority::Medium)
        .with_assignee(UserId::new(assignee))
        .with_deadline(days_from_today(7));
    let task = run_async(world.service.create(draft)).wrap_err("create scenario task")?;
    world.current_task = Some(task);
    Ok(())
}
