//! Schema constraints and how the adapter classifies their violations.

use std::sync::Arc;

use super::helpers::{TaskDatabase, new_task, test_runtime};
use axum::http::StatusCode;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasktrack::error::AppError;
use tasktrack::task::{
    dto::CreateTaskDto,
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskService, TaskServiceError},
};

/// Extra check that rejects a title the domain itself accepts, so a
/// violation can be provoked through the repository.
const RESERVED_TITLE_CHECK: &str =
    "ALTER TABLE task ADD CONSTRAINT task_title_not_reserved CHECK (title <> 'Reserved')";

#[rstest]
#[case("INSERT INTO task (title, description) VALUES ('   ', 'body')")]
#[case("INSERT INTO task (title, description) VALUES ('Title', '')")]
#[case("INSERT INTO task (title, description) VALUES (repeat('a', 256), 'body')")]
fn schema_rejects_invalid_rows(shared_test_cluster: &'static TestCluster, #[case] sql: &str) {
    let db = TaskDatabase::create(shared_test_cluster);
    let mut conn = db.connect();

    let result = diesel::sql_query(sql).execute(&mut conn);

    assert!(
        matches!(
            result,
            Err(DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _))
        ),
        "expected check violation, got {result:?}"
    );
}

#[rstest]
fn schema_rejects_missing_description(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    let mut conn = db.connect();

    let result = diesel::sql_query("INSERT INTO task (title) VALUES ('Title')").execute(&mut conn);

    assert!(
        matches!(
            result,
            Err(DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _))
        ),
        "expected not-null violation, got {result:?}"
    );
}

#[rstest]
fn check_violation_is_classified_as_constraint_violation(
    shared_test_cluster: &'static TestCluster,
) {
    let db = TaskDatabase::create(shared_test_cluster);
    db.connect()
        .batch_execute(RESERVED_TITLE_CHECK)
        .expect("add reserved-title check");

    let result = test_runtime().block_on(db.repository().create(&new_task("Reserved", "body")));

    let Err(TaskRepositoryError::ConstraintViolation(message)) = result else {
        panic!("expected constraint violation, got {result:?}");
    };
    assert!(
        message.contains("task_title_not_reserved"),
        "message should name the constraint: {message}"
    );
}

#[rstest]
fn service_reports_store_rejection_as_validation(shared_test_cluster: &'static TestCluster) {
    let db = TaskDatabase::create(shared_test_cluster);
    db.connect()
        .batch_execute(RESERVED_TITLE_CHECK)
        .expect("add reserved-title check");
    let service = TaskService::new(Arc::new(db.repository().clone()), Arc::new(DefaultClock));

    let result = test_runtime().block_on(service.create_task(CreateTaskDto::new("Reserved", "body")));

    let Err(err) = result else {
        panic!("store should have rejected the task");
    };
    assert!(matches!(err, TaskServiceError::Validation(_)), "got {err:?}");
    assert_eq!(AppError::from(err).status_code(), StatusCode::BAD_REQUEST);
}
