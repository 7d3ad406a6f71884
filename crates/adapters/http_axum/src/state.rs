//! Shared application state for axum handlers.

use std::path::PathBuf;
use std::sync::Arc;

use minaret_app::controller::LifecycleController;
use minaret_app::log_bus::InProcessLogBus;

/// Controller type driven by the HTTP surface.
pub type Controller<S, G, C> = LifecycleController<S, G, Arc<InProcessLogBus>, C>;

/// Locations of the two call recordings on disk.
#[derive(Debug, Clone)]
pub struct MediaFiles {
    /// Served at `/adhan`.
    pub regular: PathBuf,
    /// Served at `/fajradhan`.
    pub fajr: PathBuf,
}

/// Application state shared across all axum handlers.
///
/// Generic over the schedule source, device gateway and clock to avoid
/// dynamic dispatch. `Clone` is implemented manually so those types do not
/// need to be `Clone` themselves.
pub struct AppState<S, G, C> {
    pub controller: Arc<Controller<S, G, C>>,
    pub log_bus: Arc<InProcessLogBus>,
    pub media: MediaFiles,
}

impl<S, G, C> Clone for AppState<S, G, C> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            log_bus: Arc::clone(&self.log_bus),
            media: self.media.clone(),
        }
    }
}

impl<S, G, C> AppState<S, G, C> {
    pub fn new(
        controller: Arc<Controller<S, G, C>>,
        log_bus: Arc<InProcessLogBus>,
        media: MediaFiles,
    ) -> Self {
        Self {
            controller,
            log_bus,
            media,
        }
    }
}
