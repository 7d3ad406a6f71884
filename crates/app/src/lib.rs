//! # minaret-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ScheduleSource` — read the persisted schedule records
//!   - `DeviceGateway` / `DeviceHandle` — discover, connect to and command a playback device
//!   - `LogSink` — append operator-facing log lines
//!   - `Clock` — read local wall-clock time
//! - Provide the use-cases driving the system:
//!   - `ScheduleStore` — fail-soft schedule loading
//!   - `PlaybackDispatcher` — one play command plus state reconciliation
//!   - `SchedulerLoop` — arm today's triggers and fire them once each
//!   - `LifecycleController` — start/stop/select, safe under concurrent commands
//! - Provide **in-process infrastructure** (log bus, selected-device cell) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `minaret-domain` only (plus `tokio` for channels, timers and the
//! blocking pool). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod controller;
pub mod dispatcher;
pub mod log_bus;
pub mod ports;
pub mod schedule_store;
pub mod scheduler;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;
