//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the two call recordings at `/adhan` and `/fajradhan`, the JSON
/// control API under `/api` and a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG`
/// level.
pub fn build<S, G, C>(state: AppState<S, G, C>) -> Router
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route_service("/adhan", ServeFile::new(&state.media.regular))
        .route_service("/fajradhan", ServeFile::new(&state.media.fajr))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
