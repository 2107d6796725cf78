//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use task_engine::task::domain::TaskStatus;

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid expected status: {err}"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    let task = result
        .as_ref()
        .map_err(|err| eyre::eyre!("expected success, got {err}"))?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the stored task status is "{status}""#)]
fn stored_task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = world.task()?.id();
    let stored = run_async(world.service.find_by_id(id))?;

    eyre::ensure!(
        stored.status() == expected,
        "expected stored status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the operation fails with a "{kind}" error"#)]
fn operation_fails_with(world: &TaskLifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!(
            "expected {kind} error, got {} ({err})",
            err.kind().as_str()
        )),
        Ok(task) => Err(eyre::eyre!("expected {kind} error, got task {}", task.id())),
    }
}

#[then(r#"a "{topic}" event was published"#)]
fn event_was_published(world: &TaskLifecycleWorld, topic: String) -> Result<(), eyre::Report> {
    let published = world
        .emitter
        .events()
        .iter()
        .any(|event| event.topic() == topic);

    eyre::ensure!(published, "no {topic} event was published");
    Ok(())
}

#[then("no event was published")]
fn no_event_was_published(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let count = world.emitter.events().len();
    eyre::ensure!(count == 0, "expected no events, found {count}");
    Ok(())
}
