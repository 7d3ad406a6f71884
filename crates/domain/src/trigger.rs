//! Armed triggers — today's call times and whether each has fired.
//!
//! An [`ArmedSchedule`] is derived from a single [`ScheduleEntry`] when the
//! scheduler is armed. It is never persisted and is rebuilt on every arm.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::call::CallVariant;
use crate::schedule::ScheduleEntry;

/// Firing state of one trigger for its armed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerState {
    /// Waiting for its time of day.
    Pending,
    /// Already fired today.
    Fired,
    /// Its time had already passed when the scheduler was armed.
    Missed,
}

/// A call registered to fire once at `at` on the armed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmedTrigger {
    pub call: CallVariant,
    pub at: NaiveTime,
    pub state: TriggerState,
}

/// The set of triggers armed for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmedSchedule {
    date: NaiveDate,
    triggers: Vec<ArmedTrigger>,
}

impl ArmedSchedule {
    /// A schedule for `date` with zero registrations.
    #[must_use]
    pub fn unarmed(date: NaiveDate) -> Self {
        Self {
            date,
            triggers: Vec::new(),
        }
    }

    /// Register one trigger per call present in `entry`.
    ///
    /// Triggers whose time of day is already behind `armed_at` on the
    /// entry's date are registered as [`TriggerState::Missed`] and never
    /// fire.
    #[must_use]
    pub fn arm(entry: &ScheduleEntry, armed_at: NaiveDateTime) -> Self {
        let triggers = entry
            .calls
            .iter()
            .map(|(&call, &at)| {
                let passed = armed_at.date() > entry.date
                    || (armed_at.date() == entry.date && at < armed_at.time());
                ArmedTrigger {
                    call,
                    at,
                    state: if passed {
                        TriggerState::Missed
                    } else {
                        TriggerState::Pending
                    },
                }
            })
            .collect();
        Self {
            date: entry.date,
            triggers,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn triggers(&self) -> &[ArmedTrigger] {
        &self.triggers
    }

    /// Whether nothing at all was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// The earliest trigger still waiting to fire.
    #[must_use]
    pub fn next_pending(&self) -> Option<&ArmedTrigger> {
        self.triggers
            .iter()
            .filter(|trigger| trigger.state == TriggerState::Pending)
            .min_by_key(|trigger| trigger.at)
    }

    /// Mark every pending trigger whose time has been reached as fired and
    /// return their calls, earliest first.
    ///
    /// Nothing fires when `now` falls on a different date than the one
    /// armed, so a trigger fires at most once per armed day no matter how
    /// often this is polled.
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<CallVariant> {
        if now.date() != self.date {
            return Vec::new();
        }
        let mut due: Vec<&mut ArmedTrigger> = self
            .triggers
            .iter_mut()
            .filter(|trigger| trigger.state == TriggerState::Pending && trigger.at <= now.time())
            .collect();
        due.sort_by_key(|trigger| trigger.at);
        due.into_iter()
            .map(|trigger| {
                trigger.state = TriggerState::Fired;
                trigger.call
            })
            .collect()
    }
}
