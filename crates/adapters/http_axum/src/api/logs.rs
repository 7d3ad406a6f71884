//! JSON handler for recent log lines.

use axum::Json;
use axum::extract::State;

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};
use minaret_domain::log::LogEntry;

use crate::state::AppState;

/// `GET /api/logs` — recent entries, oldest first.
pub async fn recent<S, G, C>(State(state): State<AppState<S, G, C>>) -> Json<Vec<LogEntry>>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    Json(state.log_bus.recent())
}
