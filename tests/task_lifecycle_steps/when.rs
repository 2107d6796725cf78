//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, days_from_today, run_async};
use rstest_bdd_macros::when;
use task_engine::task::domain::{NewTaskDraft, TaskPriority, TaskStatus, TaskUpdate, UserId};

#[when("user {creator:i64} creates a task assigned to user {assignee:i64}")]
fn create_assigned_task(world: &mut TaskLifecycleWorld, creator: i64, assignee: i64) {
    let draft = NewTaskDraft::new(UserId::new(creator), TaskPriority::High)
        .with_assignee(UserId::new(assignee))
        .with_deadline(days_from_today(7));
    let result = run_async(world.service.create(draft));
    world.record(result);
}

#[when(r#"user {creator:i64} creates a task with status "{status}""#)]
fn create_task_with_status(
    world: &mut TaskLifecycleWorld,
    creator: i64,
    status: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let draft = NewTaskDraft::new(UserId::new(creator), TaskPriority::Low)
        .with_deadline(days_from_today(7))
        .with_status(status);
    let result = run_async(world.service.create(draft));
    world.record(result);
    Ok(())
}

#[when("the task is started")]
fn start_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.service.start(id));
    world.record(result);
    Ok(())
}

#[when("the task is completed")]
fn complete_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.service.complete(id));
    world.record(result);
    Ok(())
}

#[when("the task is reopened")]
fn reopen_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let deadline = task
        .deadline_date()
        .ok_or_else(|| eyre::eyre!("scenario task lacks a deadline"))?;
    let mut proposal = TaskUpdate::new(
        task.creator_id(),
        TaskStatus::InProgress,
        task.created_date(),
        deadline,
    );
    if let Some(assignee) = task.assigned_user_id() {
        proposal = proposal.with_assignee(assignee);
    }
    let id = task.id();
    let result = run_async(world.service.update(id, proposal));
    world.record(result);
    Ok(())
}

#[when("the task deadline is moved by {days:u64} days")]
fn move_deadline(world: &mut TaskLifecycleWorld, days: u64) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let mut proposal = TaskUpdate::new(
        task.creator_id(),
        task.status(),
        task.created_date(),
        days_from_today(7 + days),
    );
    if let Some(assignee) = task.assigned_user_id() {
        proposal = proposal.with_assignee(assignee);
    }
    let id = task.id();
    let result = run_async(world.service.update(id, proposal));
    world.record(result);
    Ok(())
}
