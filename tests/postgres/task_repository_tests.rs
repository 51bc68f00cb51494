//! Diesel repository behaviour against a live database.

use super::helpers::{TaskDatabase, new_task, test_runtime};
use diesel::connection::SimpleConnection;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasktrack::task::{
    domain::{Task, TaskChanges, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
fn connection_probe_succeeds(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);

    test_runtime()
        .block_on(db.repository().verify_connection())
        .expect("probe query");
}

#[rstest]
fn created_task_round_trips(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let repo = db.repository();
    let rt = test_runtime();

    let created = rt
        .block_on(repo.create(&new_task("Buy milk", "2%")))
        .expect("create");
    let fetched = rt
        .block_on(repo.find_by_id(created.id()))
        .expect("find_by_id")
        .expect("created task should exist");

    assert_eq!(fetched.title(), created.title());
    assert_eq!(fetched.description(), created.description());
    assert!(!fetched.is_completed());
    assert_eq!(
        fetched.created_at().timestamp_micros(),
        created.created_at().timestamp_micros()
    );
}

#[rstest]
fn find_by_id_returns_none_for_missing(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);

    let found = test_runtime()
        .block_on(db.repository().find_by_id(TaskId::new(999).expect("valid id")))
        .expect("query ok");

    assert!(found.is_none());
}

#[rstest]
fn recent_incomplete_is_newest_first_and_limited(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let repo = db.repository();
    let rt = test_runtime();

    let mut ids = Vec::new();
    for index in 1..=4 {
        let created = rt
            .block_on(repo.create(&new_task(&format!("Task {index}"), "body")))
            .expect("create");
        ids.push(created.id());
    }
    let third = *ids.get(2).expect("third id");
    rt.block_on(repo.mark_completed(third))
        .expect("mark_completed")
        .expect("third task completes");

    let recent = rt
        .block_on(repo.find_recent_incomplete(2))
        .expect("find_recent_incomplete");

    assert_eq!(titles(&recent), ["Task 4", "Task 2"]);
}

#[rstest]
fn equal_timestamps_are_ordered_by_descending_id(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let mut conn = db.connect();
    conn.batch_execute(
        "INSERT INTO task (title, description, created_at) VALUES \
         ('first', 'body', '2026-10-17T09:30:00Z'), \
         ('second', 'body', '2026-10-17T09:30:00Z'), \
         ('third', 'body', '2026-10-17T09:30:00Z')",
    )
    .expect("seed rows");
    let rt = test_runtime();

    let recent = rt
        .block_on(db.repository().find_recent_incomplete(5))
        .expect("find_recent_incomplete");
    let all = rt
        .block_on(db.repository().find_all())
        .expect("find_all");

    assert_eq!(titles(&recent), ["third", "second", "first"]);
    assert_eq!(titles(&all), ["third", "second", "first"]);
}

#[rstest]
fn conditional_completion_applies_once(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let repo = db.repository();
    let rt = test_runtime();

    let created = rt
        .block_on(repo.create(&new_task("Once", "only")))
        .expect("create");
    let first = rt
        .block_on(repo.mark_completed(created.id()))
        .expect("first mark_completed");
    let second = rt
        .block_on(repo.mark_completed(created.id()))
        .expect("second mark_completed");
    let missing = rt
        .block_on(repo.mark_completed(TaskId::new(i64::MAX).expect("valid id")))
        .expect("missing mark_completed");

    assert!(first.is_some_and(|task| task.is_completed()));
    assert!(second.is_none(), "second completion applied");
    assert!(missing.is_none(), "absent task completed");

    let stored = rt
        .block_on(repo.find_by_id(created.id()))
        .expect("find_by_id")
        .expect("task still stored");
    assert!(stored.is_completed());
}

#[rstest]
fn update_and_delete_report_missing_rows(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let repo = db.repository();
    let rt = test_runtime();

    let mut created = rt
        .block_on(repo.create(&new_task("Draft", "body")))
        .expect("create");
    created.apply_changes(TaskChanges {
        title: Some(TaskTitle::new("Final").expect("valid title")),
        description: None,
    });
    rt.block_on(repo.update_details(&created))
        .expect("update_details");
    let stored = rt
        .block_on(repo.find_by_id(created.id()))
        .expect("find_by_id")
        .expect("task still stored");
    assert_eq!(stored.title().as_str(), "Final");

    rt.block_on(repo.delete(created.id())).expect("delete");
    let update_again = rt.block_on(repo.update_details(&created));
    let delete_again = rt.block_on(repo.delete(created.id()));

    assert!(
        matches!(update_again, Err(TaskRepositoryError::NotFound(_))),
        "expected NotFound on update, got {update_again:?}"
    );
    assert!(
        matches!(delete_again, Err(TaskRepositoryError::NotFound(_))),
        "expected NotFound on delete, got {delete_again:?}"
    );
}
