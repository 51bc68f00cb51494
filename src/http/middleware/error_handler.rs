//! Error-to-response mapping.
//!
//! Handlers return [`AppError`]; its [`IntoResponse`] impl renders the
//! client-safe envelope and attaches the error to the response extensions.
//! [`handle_errors`] then logs every such response and, in development,
//! re-renders the body with the diagnostic trace under `error.stack`.

use std::any::Any;

use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::Environment;
use crate::error::AppError;
use crate::http::envelope::ErrorEnvelope;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status_code(),
            Json(ErrorEnvelope::from_error(&self, None)),
        )
            .into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Logs failed requests and finalizes their error envelope.
///
/// Responses that do not carry an [`AppError`] pass through untouched.
pub async fn handle_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let Some(err) = response.extensions().get::<AppError>().cloned() else {
        return response;
    };

    let stack = err.diagnostic_trace();
    tracing::error!(
        error = %err,
        kind = err.kind().as_str(),
        operational = err.is_operational(),
        stack = %stack,
        %path,
        %method,
        "request failed"
    );

    if !environment.is_development() {
        return response;
    }
    let mut rendered = (
        err.status_code(),
        Json(ErrorEnvelope::from_error(&err, Some(stack))),
    )
        .into_response();
    rendered.extensions_mut().insert(err);
    rendered
}

/// A handler panicked while serving a request.
#[derive(Debug, Error)]
#[error("handler panicked: {0}")]
pub struct HandlerPanic(String);

/// Converts a caught handler panic into an unclassified error response.
#[must_use]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match payload.downcast::<String>() {
        Ok(text) => *text,
        Err(other) => other.downcast::<&'static str>().map_or_else(
            |_| "unknown panic payload".to_owned(),
            |text| (*text).to_owned(),
        ),
    };
    AppError::unclassified(HandlerPanic(detail)).into_response()
}
