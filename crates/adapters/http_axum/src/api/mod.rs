//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod calls;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod logs;
pub mod scheduler;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, G, C>() -> Router<AppState<S, G, C>>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/status", get(scheduler::status::<S, G, C>))
        .route("/scheduler/start", post(scheduler::start::<S, G, C>))
        .route("/scheduler/stop", post(scheduler::stop::<S, G, C>))
        .route("/devices", get(devices::list::<S, G, C>))
        .route("/devices/selected", put(devices::select::<S, G, C>))
        .route("/calls/{call}/play", post(calls::play::<S, G, C>))
        .route("/logs", get(logs::recent::<S, G, C>))
        .route("/logs/stream", get(sse::stream::<S, G, C>))
}
