//! Scheduler loop — arms today's triggers and fires each one once.
//!
//! The loop compares armed trigger times against the [`Clock`] on a fixed
//! poll interval. Dispatches run on tokio's blocking pool so the settle and
//! verify waits never hold up the loop itself.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use minaret_domain::call::CallVariant;
use minaret_domain::playback::DispatchOutcome;
use minaret_domain::time::{format_date, format_time};
use minaret_domain::trigger::{ArmedSchedule, TriggerState};

use crate::dispatcher::PlaybackDispatcher;
use crate::ports::{Clock, DeviceGateway, LogSink, ScheduleSource};
use crate::schedule_store::ScheduleStore;

/// Whether the loop waits for a dispatch before polling again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Fire and keep polling; a watcher task logs worker failures.
    #[default]
    Detached,
    /// Await each dispatch before the next poll.
    Inline,
}

/// Timing knobs of the scheduler loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Poll cadence while at least one trigger is armed.
    pub poll_interval: Duration,
    /// Poll cadence while nothing is armed.
    pub idle_poll_interval: Duration,
    /// Emit the "nothing armed" warning once every this many idle polls.
    pub idle_warning_every: u32,
    pub dispatch_mode: DispatchMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            idle_poll_interval: Duration::from_secs(1),
            idle_warning_every: 60,
            dispatch_mode: DispatchMode::Detached,
        }
    }
}

/// Mutable state of one run of the loop.
#[derive(Debug, Clone)]
pub struct LoopState {
    armed: ArmedSchedule,
    idle_polls: u32,
}

impl LoopState {
    #[must_use]
    pub fn new(armed: ArmedSchedule) -> Self {
        Self {
            armed,
            idle_polls: 0,
        }
    }

    #[must_use]
    pub fn armed(&self) -> &ArmedSchedule {
        &self.armed
    }
}

/// Arms the day's triggers and fires the dispatcher at their times.
pub struct SchedulerLoop<S, G, L, C> {
    store: ScheduleStore<S, L>,
    dispatcher: Arc<PlaybackDispatcher<G, L>>,
    log: L,
    clock: C,
    config: SchedulerConfig,
}

impl<S, G, L, C> SchedulerLoop<S, G, L, C>
where
    S: ScheduleSource + 'static,
    G: DeviceGateway + 'static,
    L: LogSink + Clone + 'static,
    C: Clock + 'static,
{
    pub fn new(
        store: ScheduleStore<S, L>,
        dispatcher: Arc<PlaybackDispatcher<G, L>>,
        log: L,
        clock: C,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            log,
            clock,
            config,
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<PlaybackDispatcher<G, L>> {
        &self.dispatcher
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Load the schedule and register one trigger per call in today's entry.
    ///
    /// With no entry for today the result has zero registrations and a
    /// warning is logged.
    #[tracing::instrument(skip(self))]
    pub async fn arm(&self) -> ArmedSchedule {
        let schedule = self.store.load().await;
        let now = self.clock.now();
        let today = now.date();

        let Some(entry) = self.store.find_today(&schedule, today) else {
            self.log.warn(format!(
                "No call times found for {}. Check your schedule file.",
                format_date(today)
            ));
            return ArmedSchedule::unarmed(today);
        };

        let armed = ArmedSchedule::arm(entry, now);
        for trigger in armed.triggers() {
            match trigger.state {
                TriggerState::Pending => self.log.info(format!(
                    "Scheduled {} call at {}",
                    trigger.call.title(),
                    format_time(trigger.at)
                )),
                TriggerState::Missed => self.log.info(format!(
                    "{} call at {} has already passed today.",
                    trigger.call.title(),
                    format_time(trigger.at)
                )),
                TriggerState::Fired => {}
            }
        }
        armed
    }

    /// Run one iteration: re-arm on a new day, fire due triggers, and return
    /// how long to wait before the next iteration.
    pub async fn poll_once(&self, state: &mut LoopState) -> Duration {
        let now = self.clock.now();
        if now.date() != state.armed.date() {
            self.log.info(format!(
                "Date changed to {}. Re-arming scheduler...",
                format_date(now.date())
            ));
            state.armed = self.arm().await;
            state.idle_polls = 0;
        }

        if state.armed.is_empty() {
            if state.idle_polls % self.config.idle_warning_every.max(1) == 0 {
                self.log
                    .warn("No scheduled calls found. Check your schedule file.");
            }
            state.idle_polls = state.idle_polls.wrapping_add(1);
            return self.config.idle_poll_interval;
        }

        for call in state.armed.take_due(now) {
            self.fire(call).await;
        }
        self.config.poll_interval
    }

    /// Poll until `stop` turns `true` or its sender goes away, publishing the
    /// armed triggers to `view` after every iteration.
    pub async fn run(
        self: Arc<Self>,
        mut state: LoopState,
        mut stop: watch::Receiver<bool>,
        view: watch::Sender<ArmedSchedule>,
    ) {
        self.log.info("Running call scheduler...");
        loop {
            if *stop.borrow_and_update() {
                break;
            }
            let wait = self.poll_once(&mut state).await;
            view.send_replace(state.armed.clone());

            tokio::select! {
                () = tokio::time::sleep(wait) => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("scheduler loop exited");
    }

    async fn fire(&self, call: CallVariant) {
        self.log
            .info(format!("It is time for the {} call.", call.title()));
        let dispatcher = Arc::clone(&self.dispatcher);
        let task = tokio::task::spawn_blocking(move || dispatcher.dispatch(call));

        match self.config.dispatch_mode {
            DispatchMode::Inline => {
                join_dispatch(call, task, &self.log).await;
            }
            DispatchMode::Detached => {
                let log = self.log.clone();
                tokio::spawn(async move {
                    join_dispatch(call, task, &log).await;
                });
            }
        }
    }
}

/// Await a dispatch worker, logging a panic or cancellation instead of
/// propagating it.
pub(crate) async fn join_dispatch<L: LogSink>(
    call: CallVariant,
    task: JoinHandle<DispatchOutcome>,
    log: &L,
) -> Option<DispatchOutcome> {
    match task.await {
        Ok(outcome) => {
            tracing::debug!(%call, ?outcome, "dispatch finished");
            Some(outcome)
        }
        Err(err) => {
            log.error(format!(
                "Scheduler error while playing {} call: {err}",
                call.title()
            ));
            None
        }
    }
}
