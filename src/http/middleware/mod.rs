//! Request and response middleware.

pub mod error_handler;
pub mod not_found;
pub mod request_validation;

pub use error_handler::{handle_errors, handle_panic};
pub use not_found::route_not_found;
pub use request_validation::validate_request_body;
