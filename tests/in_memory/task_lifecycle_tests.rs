//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Engine, days_from_today, engine, weekly_draft};
use rstest::rstest;
use task_engine::task::{
    adapters::memory::DirectoryUserStatus,
    domain::{TaskEventKind, TaskStatus, TaskUpdate, UserId},
    services::{ErrorKind, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_full_lifecycle(engine: Engine) -> Result<(), eyre::Report> {
    let created = engine.service.create(weekly_draft()).await?;
    eyre::ensure!(created.status() == TaskStatus::Created, "new task not CREATED");

    let started = engine.service.start(created.id()).await?;
    eyre::ensure!(started.status() == TaskStatus::InProgress, "start did not apply");

    let done = engine.service.complete(created.id()).await?;
    eyre::ensure!(done.status() == TaskStatus::Done, "complete did not apply");
    eyre::ensure!(done.done_at().is_some(), "done task lacks completion time");

    let reopen = TaskUpdate::new(
        done.creator_id(),
        TaskStatus::InProgress,
        done.created_date(),
        done.deadline_date()
            .ok_or_else(|| eyre::eyre!("created task lacks a deadline"))?,
    )
    .with_assignee(UserId::new(2));
    let reopened = engine.service.update(created.id(), reopen).await?;
    eyre::ensure!(reopened.status() == TaskStatus::InProgress, "reopen failed");
    eyre::ensure!(reopened.done_at().is_none(), "reopen kept completion time");

    engine.service.delete(created.id()).await?;
    eyre::ensure!(
        engine.service.find_all().await?.is_empty(),
        "deleted task still listed"
    );

    let kinds: Vec<_> = engine
        .emitter
        .events()
        .iter()
        .map(|event| event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TaskEventKind::Created,
            TaskEventKind::Updated,
            TaskEventKind::Updated,
            TaskEventKind::Updated,
            TaskEventKind::Deleted,
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fifth_start_for_one_assignee_is_refused(engine: Engine) -> Result<(), eyre::Report> {
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(engine.service.create(weekly_draft()).await?.id());
    }
    let (last, first_four) = ids
        .split_last()
        .ok_or_else(|| eyre::eyre!("expected five tasks"))?;
    for id in first_four {
        engine.service.start(*id).await?;
    }

    let err = engine
        .service
        .start(*last)
        .await
        .expect_err("fifth start should be refused");

    assert_eq!(err.kind(), ErrorKind::IllegalState);
    let refused = engine.service.find_by_id(*last).await?;
    assert_eq!(refused.status(), TaskStatus::Created);

    let oldest = first_four
        .first()
        .ok_or_else(|| eyre::eyre!("expected four started tasks"))?;
    engine.service.complete(*oldest).await?;
    let started = engine.service.start(*last).await?;
    assert_eq!(started.status(), TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_task_rejects_deadline_change(engine: Engine) -> Result<(), eyre::Report> {
    let created = engine.service.create(weekly_draft()).await?;
    engine.service.complete(created.id()).await?;

    let moved = TaskUpdate::new(
        created.creator_id(),
        TaskStatus::InProgress,
        created.created_date(),
        days_from_today(30),
    )
    .with_assignee(UserId::new(2));
    let result = engine.service.update(created.id(), moved).await;

    assert!(matches!(result, Err(TaskLifecycleError::IllegalState(_))));
    let stored = engine.service.find_by_id(created.id()).await?;
    assert_eq!(stored.status(), TaskStatus::Done);
    assert_eq!(stored.deadline_date(), created.deadline_date());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_banned_after_creation_cannot_start(engine: Engine) -> Result<(), eyre::Report> {
    let created = engine.service.create(weekly_draft()).await?;
    engine
        .directory
        .set_user(UserId::new(2), DirectoryUserStatus::Banned);

    let result = engine.service.start(created.id()).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::UserNotFound(user)) if user == UserId::new(2)
    ));
    Ok(())
}
