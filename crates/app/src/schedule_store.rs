//! Schedule store — fail-soft loading of the schedule.

use chrono::NaiveDate;

use minaret_domain::schedule::{Schedule, ScheduleEntry};
use minaret_domain::time::format_date;

use crate::ports::{LogSink, ScheduleSource};

/// Loads and validates the schedule from a [`ScheduleSource`].
pub struct ScheduleStore<S, L> {
    source: S,
    log: L,
}

impl<S, L> ScheduleStore<S, L>
where
    S: ScheduleSource,
    L: LogSink,
{
    pub fn new(source: S, log: L) -> Self {
        Self { source, log }
    }

    /// Read and validate the whole schedule.
    ///
    /// Never fails: an unreadable source, a malformed record or a duplicate
    /// date yields an empty schedule and a logged warning.
    #[tracing::instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn load(&self) -> Schedule {
        let records = match self.source.load().await {
            Ok(records) => records,
            Err(err) => {
                self.log.warn(format!(
                    "Error loading schedule from {}: {err}",
                    self.source.describe()
                ));
                return Schedule::empty();
            }
        };

        match Schedule::from_records(records) {
            Ok(schedule) => {
                self.log
                    .info(format!("Loaded schedule: {} entries found.", schedule.len()));
                schedule
            }
            Err(err) => {
                self.log.warn(format!("Error loading schedule: {err}"));
                Schedule::empty()
            }
        }
    }

    /// Entry for exactly `today`, if any.
    #[must_use]
    pub fn find_today<'a>(&self, schedule: &'a Schedule, today: NaiveDate) -> Option<&'a ScheduleEntry> {
        let entry = schedule.find(today);
        if entry.is_none() {
            tracing::debug!(date = %format_date(today), "no schedule entry");
        }
        entry
    }
}
