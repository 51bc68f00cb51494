//! Task tracking.
//!
//! Creating tasks, listing the most recent incomplete ones, fetching a task by
//! identifier, and completing a task exactly once. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Inbound validation in [`dto`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod dto;
pub mod ports;
pub mod services;
