//! JSON handlers for the scheduler lifecycle.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use minaret_app::controller::{ControllerStatus, SchedulerState};
use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};

use crate::state::AppState;

/// Result of a start or stop command.
#[derive(Debug, Serialize)]
pub struct LifecycleResponse {
    /// Whether the command changed the scheduler state.
    pub changed: bool,
    pub state: SchedulerState,
}

/// `GET /api/status`
pub async fn status<S, G, C>(State(state): State<AppState<S, G, C>>) -> Json<ControllerStatus>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    Json(state.controller.status().await)
}

/// `POST /api/scheduler/start`
pub async fn start<S, G, C>(State(state): State<AppState<S, G, C>>) -> Json<LifecycleResponse>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    let changed = state.controller.start().await;
    Json(LifecycleResponse {
        changed,
        state: state.controller.state().await,
    })
}

/// `POST /api/scheduler/stop`
pub async fn stop<S, G, C>(State(state): State<AppState<S, G, C>>) -> Json<LifecycleResponse>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    let changed = state.controller.stop().await;
    Json(LifecycleResponse {
        changed,
        state: state.controller.state().await,
    })
}
