//! Lifecycle controller — start, stop and device selection, safe to call
//! from any number of concurrent control surfaces.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

use minaret_domain::call::CallVariant;
use minaret_domain::error::{MinaretError, ValidationError};
use minaret_domain::id::RunId;
use minaret_domain::playback::DispatchOutcome;
use minaret_domain::trigger::ArmedSchedule;

use crate::ports::{Clock, DeviceGateway, LogSink, ScheduleSource};
use crate::scheduler::{LoopState, SchedulerLoop, join_dispatch};

/// Whether the scheduler loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Running,
    Stopped,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
        })
    }
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerStatus {
    pub state: SchedulerState,
    pub selected_device: Option<String>,
    /// Today's triggers, present only while running.
    pub armed: Option<ArmedSchedule>,
}

struct ActiveRun {
    id: RunId,
    stop: watch::Sender<bool>,
    view: watch::Receiver<ArmedSchedule>,
    task: JoinHandle<()>,
}

impl ActiveRun {
    fn is_live(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Owns the running flag and the selected device.
///
/// Each start spawns a fresh loop with its own stop signal, so a stop
/// followed quickly by a start never leaves two loops running.
pub struct LifecycleController<S, G, L, C> {
    scheduler: Arc<SchedulerLoop<S, G, L, C>>,
    log: L,
    /// Serializes `start` calls; held while arming so `active` never is.
    starting: Mutex<()>,
    active: Mutex<Option<ActiveRun>>,
}

impl<S, G, L, C> LifecycleController<S, G, L, C>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    L: LogSink + Clone + 'static,
    C: Clock + 'static,
{
    pub fn new(scheduler: Arc<SchedulerLoop<S, G, L, C>>, log: L) -> Self {
        Self {
            scheduler,
            log,
            starting: Mutex::new(()),
            active: Mutex::new(None),
        }
    }

    /// Arm today's schedule and launch the loop.
    ///
    /// Returns `false` without doing anything when already running. Status
    /// queries and `stop` are not blocked while the schedule is read.
    #[tracing::instrument(skip(self))]
    pub async fn start(&self) -> bool {
        let _starting = self.starting.lock().await;
        if self.active.lock().await.as_ref().is_some_and(ActiveRun::is_live) {
            self.log.warn("Scheduler is already running.");
            return false;
        }

        self.log.info("Starting call scheduler...");
        let armed = self.scheduler.arm().await;
        let (stop_tx, stop_rx) = watch::channel(false);
        let (view_tx, view_rx) = watch::channel(armed.clone());
        let id = RunId::new();
        let task = tokio::spawn(
            Arc::clone(&self.scheduler)
                .run(LoopState::new(armed), stop_rx, view_tx)
                .instrument(tracing::info_span!("scheduler_run", run_id = %id)),
        );
        *self.active.lock().await = Some(ActiveRun {
            id,
            stop: stop_tx,
            view: view_rx,
            task,
        });
        self.log.info("Scheduler started.");
        true
    }

    /// Signal the loop to exit. In-flight playback is left alone.
    ///
    /// Returns `false` when nothing was running.
    #[tracing::instrument(skip(self))]
    pub async fn stop(&self) -> bool {
        let run = self.active.lock().await.take();
        match run {
            Some(run) if run.is_live() => {
                let _ = run.stop.send(true);
                tracing::debug!(run_id = %run.id, "stop signalled");
                self.log.info("Scheduler stopped.");
                true
            }
            _ => {
                self.log.info("Scheduler is not running.");
                false
            }
        }
    }

    /// Stop the loop and abort its task without waiting for it.
    pub async fn shutdown(&self) {
        if let Some(run) = self.active.lock().await.take() {
            let _ = run.stop.send(true);
            run.task.abort();
            self.log.info("Scheduler stopped.");
        }
        self.log.info("Shutting down.");
    }

    pub async fn state(&self) -> SchedulerState {
        if self.active.lock().await.as_ref().is_some_and(ActiveRun::is_live) {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    pub async fn status(&self) -> ControllerStatus {
        let active = self.active.lock().await;
        let live = active.as_ref().filter(|run| run.is_live());
        ControllerStatus {
            state: if live.is_some() {
                SchedulerState::Running
            } else {
                SchedulerState::Stopped
            },
            selected_device: self.selected_device(),
            armed: live.map(|run| run.view.borrow().clone()),
        }
    }

    /// Select the device the next dispatch will target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceName`] for a blank name.
    pub fn select_device(&self, name: &str) -> Result<(), MinaretError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyDeviceName.into());
        }
        self.scheduler.dispatcher().selection().set(name);
        self.log.info(format!("Selected device: {name}"));
        Ok(())
    }

    #[must_use]
    pub fn selected_device(&self) -> Option<String> {
        self.scheduler.dispatcher().selection().get()
    }

    /// Names of every device currently on the network.
    pub async fn list_devices(&self) -> Vec<String> {
        let dispatcher = Arc::clone(self.scheduler.dispatcher());
        match tokio::task::spawn_blocking(move || dispatcher.list_device_names()).await {
            Ok(names) => names,
            Err(err) => {
                self.log.error(format!("Device discovery failed: {err}"));
                Vec::new()
            }
        }
    }

    /// Select the first device found on the network, if any.
    pub async fn select_first_available(&self) -> Option<String> {
        let Some(first) = self.list_devices().await.into_iter().next() else {
            self.log.warn("No devices found on the network.");
            return None;
        };
        self.scheduler.dispatcher().selection().set(first.clone());
        self.log.info(format!("Selected device: {first}"));
        Some(first)
    }

    /// Play `call` right away on the selected device, whether or not the
    /// scheduler is running.
    #[tracing::instrument(skip(self))]
    pub async fn play_now(&self, call: CallVariant) -> DispatchOutcome {
        self.log.info(format!("Playing {} call now.", call.title()));
        let dispatcher = Arc::clone(self.scheduler.dispatcher());
        let task = tokio::task::spawn_blocking(move || dispatcher.dispatch(call));
        join_dispatch(call, task, &self.log)
            .await
            .unwrap_or_else(|| DispatchOutcome::Failed {
                device: self.selected_device().unwrap_or_default(),
                reason: "dispatch worker failed".to_string(),
            })
    }
}
