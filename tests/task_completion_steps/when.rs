//! When steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::task::dto::CompleteTaskDto;

#[when("the task is completed")]
fn complete_current_task(world: &mut TaskCompletionWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .last_created_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?
        .id();
    world.last_completion_result = Some(run_async(world.service.complete_task(task_id)));
    Ok(())
}

#[when("task {id:i64} is completed")]
fn complete_task_by_id(world: &mut TaskCompletionWorld, id: i64) -> Result<(), eyre::Report> {
    let task_id = CompleteTaskDto::from(id).task_id()?;
    world.last_completion_result = Some(run_async(world.service.complete_task(task_id)));
    Ok(())
}
