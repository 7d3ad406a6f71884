//! JSON handlers for playback devices.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};

use crate::error::ApiError;
use crate::state::AppState;

/// Devices on the network and the current selection.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<String>,
    pub selected: Option<String>,
}

/// Request body for selecting a device.
#[derive(Debug, Deserialize)]
pub struct SelectDeviceRequest {
    pub name: String,
}

/// Response to a successful selection.
#[derive(Debug, Serialize)]
pub struct SelectedResponse {
    pub selected: String,
}

/// `GET /api/devices`
pub async fn list<S, G, C>(State(state): State<AppState<S, G, C>>) -> Json<DevicesResponse>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    let devices = state.controller.list_devices().await;
    Json(DevicesResponse {
        devices,
        selected: state.controller.selected_device(),
    })
}

/// `PUT /api/devices/selected`
pub async fn select<S, G, C>(
    State(state): State<AppState<S, G, C>>,
    Json(req): Json<SelectDeviceRequest>,
) -> Result<Json<SelectedResponse>, ApiError>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    state.controller.select_device(&req.name)?;
    Ok(Json(SelectedResponse {
        selected: req.name.trim().to_string(),
    }))
}
