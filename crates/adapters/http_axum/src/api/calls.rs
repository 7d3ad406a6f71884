//! JSON handler for playing a call on demand.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};
use minaret_domain::call::CallVariant;
use minaret_domain::error::MinaretError;
use minaret_domain::playback::DispatchOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/calls/{call}/play`
///
/// Runs one dispatch right away and returns how it ended. Takes as long as
/// the device's settle and verify waits.
pub async fn play<S, G, C>(
    State(state): State<AppState<S, G, C>>,
    Path(call): Path<String>,
) -> Result<Json<DispatchOutcome>, ApiError>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    let call = CallVariant::from_str(&call).map_err(MinaretError::from)?;
    Ok(Json(state.controller.play_now(call).await))
}
