//! Clock port — where "now" comes from.

use std::sync::Arc;

use chrono::NaiveDateTime;

/// Source of local wall-clock time.
///
/// Schedule times are compared against this value, so tests inject a
/// manual clock instead of waiting for real time to pass.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        minaret_domain::time::now_local()
    }
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
