//! Tasktrack: a small task-tracking REST backend.
//!
//! Clients create tasks, list the most recent incomplete ones, fetch a task
//! by id and mark tasks as completed. Every response is a JSON envelope and
//! every failure maps onto one of four error kinds with a fixed HTTP status.
//!
//! # Architecture
//!
//! The task core follows hexagonal architecture principles:
//!
//! - **Domain**: validated value types and the completion transition
//! - **Ports**: the repository trait the service depends on
//! - **Adapters**: in-memory and `PostgreSQL` repositories
//! - **Services**: business rules layered over a repository
//!
//! # Modules
//!
//! - [`task`]: task domain, DTOs, persistence and service
//! - [`error`]: application error taxonomy
//! - [`http`]: axum routes, handlers and middleware
//! - [`config`]: environment-driven configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod error;
pub mod http;
pub mod task;
pub mod telemetry;
