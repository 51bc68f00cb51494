//! Embedded-cluster helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tasktrack::task::{
    adapters::postgres::{PostgresTaskRepository, build_pool},
    domain::{NewTask, TaskDescription, TaskTitle},
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Schema applied to the template database.
const CREATE_TASK_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_task/up.sql");

/// Template database holding the migrated schema.
const TEMPLATE_DB: &str = "tasktrack_test_template";

/// Creates a runtime for driving the async repository from sync tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn ensure_template(cluster: &TestCluster) {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASK_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .expect("template setup");
}

/// Drops the per-test database when the test finishes, even on panic.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// A freshly migrated database with a single-connection repository over it.
///
/// The repository is declared first so its pool closes before the database
/// is dropped.
pub struct TaskDatabase {
    repository: PostgresTaskRepository,
    url: String,
    _cleanup: CleanupGuard,
}

impl TaskDatabase {
    /// Clones the template into a uniquely named database.
    pub fn create(cluster: &'static TestCluster) -> Self {
        ensure_template(cluster);
        let db_name = format!("tasktrack_test_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .expect("database from template");
        let cleanup = CleanupGuard {
            cluster,
            db_name: db_name.clone(),
        };

        let url = cluster.connection().database_url(&db_name);
        let pool = build_pool(&url, 1).expect("connection pool");
        Self {
            repository: PostgresTaskRepository::new(pool),
            url,
            _cleanup: cleanup,
        }
    }

    /// Returns the repository under test.
    pub const fn repository(&self) -> &PostgresTaskRepository {
        &self.repository
    }

    /// Opens a direct connection for raw SQL, bypassing the repository.
    pub fn connect(&self) -> PgConnection {
        PgConnection::establish(&self.url).expect("direct connection")
    }
}

/// Builds an unsaved task stamped with the current time.
pub fn new_task(title: &str, description: &str) -> NewTask {
    NewTask::new(
        TaskTitle::new(title).expect("valid title"),
        TaskDescription::new(description).expect("valid description"),
        &DefaultClock,
    )
}
