//! Hand-written fakes for the ports, shared by the app crate's tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Notify;

use minaret_domain::device::{MediaRequest, PlayerState};
use minaret_domain::error::MinaretError;
use minaret_domain::log::LogEntry;
use minaret_domain::schedule::ScheduleRecord;

use crate::dispatcher::{PlaybackDispatcher, SettleTimings};
use crate::ports::{Clock, DeviceGateway, DeviceHandle, LogSink, ScheduleSource};
use crate::schedule_store::ScheduleStore;
use crate::scheduler::{DispatchMode, SchedulerConfig, SchedulerLoop};
use crate::selection::SelectedDevice;

pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, second).unwrap()
}

pub fn record(date: &str, fajr: Option<&str>, maghrib: Option<&str>, isha: Option<&str>) -> ScheduleRecord {
    ScheduleRecord {
        date: date.to_string(),
        fajr: fajr.map(str::to_string),
        maghrib: maghrib.map(str::to_string),
        isha: isha.map(str::to_string),
    }
}

// ── Clock ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<NaiveDateTime>>);

impl ManualClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

// ── Schedule source ────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySource {
    records: Mutex<Option<Vec<ScheduleRecord>>>,
    loads: AtomicUsize,
    gate: Option<Notify>,
}

impl InMemorySource {
    pub fn with(records: Vec<ScheduleRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
            ..Self::default()
        }
    }

    /// A source whose reads wait until [`Self::release`] is called.
    pub fn held(records: Vec<ScheduleRecord>) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::with(records)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// A source whose every read fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn replace(&self, records: Vec<ScheduleRecord>) {
        *self.records.lock().unwrap() = Some(records);
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ScheduleSource for InMemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn load(&self) -> Result<Vec<ScheduleRecord>, MinaretError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.records
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| MinaretError::ScheduleSource("unreadable".into()))
    }
}

// ── Device gateway ─────────────────────────────────────────────

#[derive(Default)]
pub struct GatewayRecord {
    pub devices: Vec<String>,
    /// Player states returned in order; the last one repeats.
    pub states: VecDeque<PlayerState>,
    pub connect_fails: bool,
    pub play_fails: bool,
    pub play_panics: bool,
    pub resolved: Vec<String>,
    pub played: Vec<(String, MediaRequest)>,
    pub force_plays: usize,
}

#[derive(Clone, Default)]
pub struct RecordingGateway(pub Arc<Mutex<GatewayRecord>>);

impl RecordingGateway {
    pub fn with_devices(devices: &[&str]) -> Self {
        let gateway = Self::default();
        gateway.0.lock().unwrap().devices = devices.iter().map(|d| (*d).to_string()).collect();
        gateway
    }

    pub fn reporting(self, states: &[PlayerState]) -> Self {
        self.0.lock().unwrap().states = states.iter().copied().collect();
        self
    }

    pub fn failing_to_connect(self) -> Self {
        self.0.lock().unwrap().connect_fails = true;
        self
    }

    /// The next `play_media` panics, as a broken device library would.
    pub fn panicking_once(self) -> Self {
        self.0.lock().unwrap().play_panics = true;
        self
    }

    pub fn rejecting_media(self) -> Self {
        self.0.lock().unwrap().play_fails = true;
        self
    }

    pub fn resolved(&self) -> Vec<String> {
        self.0.lock().unwrap().resolved.clone()
    }

    pub fn played(&self) -> Vec<(String, MediaRequest)> {
        self.0.lock().unwrap().played.clone()
    }

    pub fn force_plays(&self) -> usize {
        self.0.lock().unwrap().force_plays
    }
}

pub struct RecordingHandle {
    name: String,
    record: Arc<Mutex<GatewayRecord>>,
}

impl DeviceHandle for RecordingHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn play_media(&mut self, request: &MediaRequest) -> Result<(), MinaretError> {
        let mut record = self.record.lock().unwrap();
        if std::mem::take(&mut record.play_panics) {
            drop(record);
            panic!("device library panicked");
        }
        if record.play_fails {
            return Err(MinaretError::Device("load rejected".into()));
        }
        record.played.push((self.name.clone(), request.clone()));
        Ok(())
    }

    fn force_play(&mut self) -> Result<(), MinaretError> {
        self.record.lock().unwrap().force_plays += 1;
        Ok(())
    }

    fn player_state(&mut self) -> Result<PlayerState, MinaretError> {
        let mut record = self.record.lock().unwrap();
        let state = if record.states.len() > 1 {
            record.states.pop_front()
        } else {
            record.states.front().copied()
        };
        Ok(state.unwrap_or(PlayerState::Playing))
    }
}

impl DeviceGateway for RecordingGateway {
    type Handle = RecordingHandle;

    fn list_device_names(&self) -> Vec<String> {
        self.0.lock().unwrap().devices.clone()
    }

    fn resolve(&self, name: &str) -> Result<Option<RecordingHandle>, MinaretError> {
        let mut record = self.0.lock().unwrap();
        record.resolved.push(name.to_string());
        if !record.devices.iter().any(|d| d == name) {
            return Ok(None);
        }
        if record.connect_fails {
            return Err(MinaretError::Device("connection refused".into()));
        }
        Ok(Some(RecordingHandle {
            name: name.to_string(),
            record: Arc::clone(&self.0),
        }))
    }
}

// ── Log sink ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<LogEntry>>>);

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|e| e.message.clone()).collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.messages().iter().filter(|m| m.contains(needle)).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.count(needle) > 0
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, entry: LogEntry) {
        self.0.lock().unwrap().push(entry);
    }
}

// ── Wiring ─────────────────────────────────────────────────────

pub type TestScheduler = SchedulerLoop<Arc<InMemorySource>, RecordingGateway, RecordingSink, ManualClock>;

pub fn urls() -> minaret_domain::playback::PlaybackUrls {
    minaret_domain::playback::PlaybackUrls::under("http://10.0.0.2:5000")
}

pub fn instant_timings() -> SettleTimings {
    SettleTimings {
        settle: Duration::ZERO,
        verify: Duration::ZERO,
    }
}

pub fn dispatcher(gateway: RecordingGateway, log: RecordingSink, selected: Option<&str>) -> PlaybackDispatcher<RecordingGateway, RecordingSink> {
    PlaybackDispatcher::new(
        gateway,
        log,
        urls(),
        instant_timings(),
        SelectedDevice::new(selected.map(str::to_string)),
    )
}

pub fn inline_config() -> SchedulerConfig {
    SchedulerConfig {
        dispatch_mode: DispatchMode::Inline,
        ..SchedulerConfig::default()
    }
}

pub fn scheduler(
    source: Arc<InMemorySource>,
    gateway: RecordingGateway,
    log: RecordingSink,
    clock: ManualClock,
    selected: Option<&str>,
) -> TestScheduler {
    SchedulerLoop::new(
        ScheduleStore::new(source, log.clone()),
        Arc::new(dispatcher(gateway, log.clone(), selected)),
        log,
        clock,
        inline_config(),
    )
}

/// A scheduler in the default detached mode with the given settle timings.
pub fn detached_scheduler(
    source: Arc<InMemorySource>,
    gateway: RecordingGateway,
    log: RecordingSink,
    clock: ManualClock,
    selected: Option<&str>,
    timings: SettleTimings,
) -> TestScheduler {
    let dispatcher = PlaybackDispatcher::new(
        gateway,
        log.clone(),
        urls(),
        timings,
        SelectedDevice::new(selected.map(str::to_string)),
    );
    SchedulerLoop::new(
        ScheduleStore::new(source, log.clone()),
        Arc::new(dispatcher),
        log,
        clock,
        SchedulerConfig::default(),
    )
}
