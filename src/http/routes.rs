//! Route table and middleware stack.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `{prefix}/health` | [`health_check`] |
//! | POST | `{prefix}/tasks` | [`create_task`] |
//! | GET | `{prefix}/tasks` | [`list_recent_tasks`] |
//! | GET | `{prefix}/tasks/{id}` | [`get_task`] |
//! | PATCH | `{prefix}/tasks/{id}/complete` | [`complete_task`] |
//!
//! A trailing slash is ignored, so `{prefix}/tasks/` lists tasks too.
//! Anything else, including a listed path with another method, is answered
//! by [`route_not_found`].

use axum::Router;
use axum::http::{Method, header};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch};
use mockable::Clock;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CorsOrigin};
use crate::http::handlers::{
    complete_task, create_task, get_task, health_check, list_recent_tasks,
};
use crate::http::middleware::{handle_errors, handle_panic, route_not_found};
use crate::http::state::AppState;
use crate::task::ports::TaskRepository;

/// Builds the application router.
///
/// Routes are mounted under `config.api_prefix`, or at the root when the
/// prefix is empty. Layers, from innermost: panic recovery, error logging
/// and rendering, request tracing, CORS. Trailing slashes are trimmed before
/// routing.
pub fn create_router<R, C>(state: AppState<R, C>, config: &AppConfig) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let api = Router::new()
        .route("/health", get(health_check::<R, C>))
        .route(
            "/tasks",
            get(list_recent_tasks::<R, C>).post(create_task::<R, C>),
        )
        .route("/tasks/{id}", get(get_task::<R, C>))
        .route("/tasks/{id}/complete", patch(complete_task::<R, C>))
        .method_not_allowed_fallback(route_not_found)
        .with_state(state);

    let mounted = if config.api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&config.api_prefix, api)
    };

    let app = mounted
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(config.environment, handle_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin));

    // Path rewriting must happen before the inner router matches.
    Router::new().fallback_service(NormalizePath::trim_trailing_slash(app))
}

fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    match origin {
        CorsOrigin::Any => layer.allow_origin(cors::Any),
        CorsOrigin::Exact(value) => layer.allow_origin(value.clone()),
    }
}
