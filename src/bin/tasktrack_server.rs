//! Runs the task-tracking HTTP server.
//!
//! Usage:
//!
//! ```text
//! tasktrack-server
//! ```
//!
//! All settings come from environment variables (optionally via a `.env`
//! file): `PORT`, `HOST`, `APP_ENV`, `API_PREFIX`, `CORS_ORIGIN`,
//! `STORAGE_BACKEND`, `DATABASE_URL` (or `DB_HOST`, `DB_PORT`, `DB_USER`,
//! `DB_PASS`, `DB_NAME`), `DB_POOL_MAX`, `LOG_FORMAT` and `RUST_LOG`.
//!
//! With `STORAGE_BACKEND=postgres` the server refuses to start unless the
//! database answers a probe query. The schema is expected to exist already;
//! see `migrations/`.

use std::sync::Arc;

use mockable::DefaultClock;
use tasktrack::config::{AppConfig, StorageBackend};
use tasktrack::http::{AppState, create_router};
use tasktrack::task::adapters::{memory::InMemoryTaskRepository, postgres};
use tasktrack::task::ports::TaskRepository;
use tasktrack::telemetry;
use tokio::net::TcpListener;
use tokio::signal;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(config.environment, config.log_format)?;

    tracing::info!(
        environment = %config.environment,
        api_prefix = %config.api_prefix,
        storage = ?config.storage_backend,
        "starting tasktrack server"
    );

    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; tasks are lost on restart");
            serve(Arc::new(InMemoryTaskRepository::new()), &config).await
        }
        StorageBackend::Postgres => {
            let pool = postgres::build_pool(&config.database_url, config.pool_max_size)?;
            let repository = postgres::PostgresTaskRepository::new(pool);
            repository.verify_connection().await?;
            tracing::info!("database connection established");
            serve(Arc::new(repository), &config).await
        }
    }
}

async fn serve<R>(repository: Arc<R>, config: &AppConfig) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
{
    let router = create_router(AppState::new(repository, Arc::new(DefaultClock)), config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
