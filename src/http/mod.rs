//! HTTP surface: routing, handlers, middleware and response envelopes.
//!
//! Every response body is a JSON envelope. Successful responses carry
//! `"success": true` and the payload under `data`; failures carry
//! `"success": false` and an `error` object with the message and status code.

pub mod envelope;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
