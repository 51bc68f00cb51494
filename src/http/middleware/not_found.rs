//! Fallback for unmatched routes.

use axum::Json;
use axum::extract::OriginalUri;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::envelope::ErrorEnvelope;

/// Responds 404 for any request no route accepts, including a known path
/// requested with an unsupported method.
///
/// The message names the method and the full request path, prefix included.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let message = format!("Route {method} {} not found", uri.path());
    tracing::debug!(%method, path = uri.path(), "no route matched");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(message, StatusCode::NOT_FOUND, None)),
    )
        .into_response()
}
