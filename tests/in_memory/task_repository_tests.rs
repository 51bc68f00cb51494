//! In-memory repository behaviour.

use super::helpers::{new_task, repo};
use rstest::rstest;
use tasktrack::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_start_at_one_and_increase(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let first = repo.create(&new_task("First", "one")?).await?;
    let second = repo.create(&new_task("Second", "two")?).await?;

    eyre::ensure!(first.id().value() == 1, "first id was {}", first.id());
    eyre::ensure!(second.id().value() == 2, "second id was {}", second.id());
    eyre::ensure!(!first.is_completed(), "new tasks start incomplete");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_incomplete_is_newest_first_and_limited(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    for index in 1..=4 {
        repo.create(&new_task(&format!("Task {index}"), "body")?)
            .await?;
    }
    repo.mark_completed(TaskId::new(3)?).await?;

    let recent = repo.find_recent_incomplete(2).await?;
    let ids: Vec<i64> = recent.iter().map(|task| task.id().value()).collect();

    eyre::ensure!(ids == vec![4, 2], "unexpected order {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_includes_completed_tasks(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let created = repo.create(&new_task("Done soon", "body")?).await?;
    repo.mark_completed(created.id()).await?;
    repo.create(&new_task("Still open", "body")?).await?;

    let all = repo.find_all().await?;
    eyre::ensure!(all.len() == 2, "expected two tasks, found {}", all.len());
    eyre::ensure!(
        all.iter().any(|task| task.is_completed()),
        "completed task missing from full listing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_completed_succeeds_only_once(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let created = repo.create(&new_task("Once", "only")?).await?;

    let first = repo.mark_completed(created.id()).await?;
    let second = repo.mark_completed(created.id()).await?;

    let completed = first.ok_or_else(|| eyre::eyre!("first completion returned nothing"))?;
    eyre::ensure!(completed.is_completed(), "returned task not completed");
    eyre::ensure!(
        completed.created_at() == created.created_at(),
        "completion changed createdAt"
    );
    eyre::ensure!(second.is_none(), "second completion should be refused");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_completed_reports_absent_task_as_none(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let outcome = repo.mark_completed(TaskId::new(42)?).await?;
    eyre::ensure!(outcome.is_none(), "absent task cannot be completed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_details_keeps_completion_flag(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let mut created = repo.create(&new_task("Before", "body")?).await?;
    repo.mark_completed(created.id()).await?;

    created.apply_changes(tasktrack::task::domain::TaskChanges {
        title: Some(TaskTitle::new("After")?),
        description: None,
    });
    repo.update_details(&created).await?;

    let stored = repo
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    eyre::ensure!(stored.title().as_str() == "After", "title not updated");
    eyre::ensure!(stored.is_completed(), "update must not reopen the task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_missing_task(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    let created = repo.create(&new_task("Short lived", "body")?).await?;
    repo.delete(created.id()).await?;

    let again = repo.delete(created.id()).await;
    eyre::ensure!(
        matches!(again, Err(TaskRepositoryError::NotFound(id)) if id == created.id()),
        "expected NotFound, got {again:?}"
    );
    eyre::ensure!(
        repo.find_by_id(created.id()).await?.is_none(),
        "deleted task still visible"
    );
    Ok(())
}
