//! Inbound data transfer objects for task operations.
//!
//! DTOs normalise raw request input and report every rule violation at
//! once, before any business logic runs.

mod complete;
mod create;
mod outcome;
mod update;

pub use complete::CompleteTaskDto;
pub use create::CreateTaskDto;
pub use outcome::ValidationOutcome;
pub use update::UpdateTaskDto;
