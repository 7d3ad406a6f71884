//! Server-Sent Events (SSE) stream of log lines.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use minaret_app::ports::{Clock, DeviceGateway, ScheduleSource};

use crate::state::AppState;

/// `GET /api/logs/stream` — SSE stream of log entries as they are emitted.
///
/// Each entry is sent as a JSON `data:` frame with the `log` event name.
/// The stream continues until the client disconnects.
pub async fn stream<S, G, C>(
    State(state): State<AppState<S, G, C>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    C: Clock + 'static,
{
    let log_rx = state.log_bus.subscribe();
    let log_stream = BroadcastStream::new(log_rx).filter_map(|result| match result {
        Ok(entry) => match serde_json::to_string(&entry) {
            Ok(json) => Some(Ok(Event::default().event("log").data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize log entry for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some log lines were dropped");
            None
        }
    });

    Sse::new(log_stream).keep_alive(KeepAlive::default())
}
