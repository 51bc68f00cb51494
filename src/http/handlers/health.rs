//! Liveness endpoint.

use axum::Json;
use axum::extract::State;
use mockable::Clock;

use crate::http::{envelope::HealthEnvelope, state::AppState};
use crate::task::ports::TaskRepository;

/// `GET /health`: reports that the server is accepting requests.
///
/// The store is not consulted.
pub async fn health_check<R, C>(State(state): State<AppState<R, C>>) -> Json<HealthEnvelope>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    Json(HealthEnvelope::at(state.clock().utc()))
}
