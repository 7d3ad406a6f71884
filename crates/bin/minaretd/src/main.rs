//! # minaretd — minaret daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing`
//! - Work out the URL devices use to fetch the call recordings
//! - Construct the schedule source and device gateway (adapters)
//! - Construct the dispatcher, scheduler loop and lifecycle controller
//! - Select the initial device and optionally start the scheduler
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod net;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use minaret_adapter_chromecast::ChromecastGateway;
use minaret_adapter_http_axum::router;
use minaret_adapter_http_axum::state::AppState;
use minaret_adapter_schedule_json::JsonScheduleSource;
use minaret_adapter_virtual::VirtualGateway;
use minaret_app::controller::LifecycleController;
use minaret_app::dispatcher::PlaybackDispatcher;
use minaret_app::log_bus::InProcessLogBus;
use minaret_app::ports::{DeviceGateway, LogSink, SystemClock};
use minaret_app::schedule_store::ScheduleStore;
use minaret_app::scheduler::SchedulerLoop;
use minaret_app::selection::SelectedDevice;
use minaret_domain::playback::PlaybackUrls;

use config::{Backend, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.device.backend {
        Backend::Chromecast => {
            let gateway = ChromecastGateway::new(config.chromecast());
            serve(config, gateway).await
        }
        Backend::Virtual => serve(config, VirtualGateway::default()).await,
    }
}

async fn serve<G>(config: Config, gateway: G) -> Result<(), Box<dyn std::error::Error>>
where
    G: DeviceGateway + 'static,
{
    // Log bus
    let log = Arc::new(InProcessLogBus::default());

    // Recording URLs
    let local_ip = net::local_ip().unwrap_or_else(|| {
        log.warn("Could not determine the local IP address. Falling back to 127.0.0.1.");
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    });
    let urls = PlaybackUrls::under(&config.base_url(local_ip));
    tracing::info!(regular = %urls.regular, fajr = %urls.fajr, "call recordings served");

    // Services
    let dispatcher = Arc::new(PlaybackDispatcher::new(
        gateway,
        Arc::clone(&log),
        urls,
        config.settle_timings(),
        SelectedDevice::new(None),
    ));
    let store = ScheduleStore::new(
        JsonScheduleSource::new(config.schedule.path.clone()),
        Arc::clone(&log),
    );
    let scheduler = Arc::new(SchedulerLoop::new(
        store,
        dispatcher,
        Arc::clone(&log),
        SystemClock,
        config.scheduler_config(),
    ));
    let controller = Arc::new(LifecycleController::new(scheduler, Arc::clone(&log)));

    // Initial device
    match config.device.preferred.as_deref() {
        Some(name) => controller.select_device(name)?,
        None => {
            controller.select_first_available().await;
        }
    }
    if config.scheduler.autostart {
        controller.start().await;
    }

    // HTTP
    let state = AppState::new(Arc::clone(&controller), log, config.media_files());
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("minaretd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    controller.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
