//! In-memory integration tests for lifecycle stream consumption.

use super::helpers::{active_directory, service_with_emitter, weekly_draft};
use std::sync::Arc;
use task_engine::{
    config::EngineConfig,
    notification::{ListenerSummary, TaskEventListener},
    task::{
        adapters::{memory::DirectoryUserStatus, stream::ChannelEventEmitter},
        domain::UserId,
    },
};

#[tokio::test(flavor = "multi_thread")]
async fn listener_sees_every_committed_change() -> Result<(), eyre::Report> {
    let directory = active_directory();
    let (emitter, receiver) =
        ChannelEventEmitter::new(EngineConfig::default().events.channel_capacity);
    let service = service_with_emitter(&directory, emitter);
    let listener = TaskEventListener::new(Arc::new(directory.clone()));
    let consumer = tokio::spawn(async move { listener.run(receiver).await });

    let task = service.create(weekly_draft()).await?;
    service.start(task.id()).await?;
    service.complete(task.id()).await?;
    service.delete(task.id()).await?;
    drop(service);

    let summary = consumer.await?;
    assert_eq!(
        summary,
        ListenerSummary {
            sent: 4,
            skipped: 0,
            failed: 0,
        }
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listener_skips_creators_that_no_longer_resolve() -> Result<(), eyre::Report> {
    let directory = active_directory();
    let (emitter, receiver) = ChannelEventEmitter::new(16);
    let service = service_with_emitter(&directory, emitter);

    let task = service.create(weekly_draft()).await?;
    directory.set_user(UserId::new(1), DirectoryUserStatus::Deleted);
    service.delete(task.id()).await?;
    drop(service);

    let listener = TaskEventListener::new(Arc::new(directory));
    let summary = listener.run(receiver).await;

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.handled(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_stream_does_not_fail_operations() -> Result<(), eyre::Report> {
    let directory = active_directory();
    let (emitter, receiver) = ChannelEventEmitter::new(1);
    drop(receiver);
    let service = service_with_emitter(&directory, emitter);

    let task = service.create(weekly_draft()).await?;
    let stored = service.find_by_id(task.id()).await?;

    assert_eq!(stored, task);
    Ok(())
}
