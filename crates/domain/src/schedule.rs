//! Schedule — the call times for each calendar date.
//!
//! A schedule is loaded wholesale from a persisted source, validated once,
//! and never mutated afterwards.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::call::CallVariant;
use crate::error::{MinaretError, ValidationError};
use crate::time::{parse_date, parse_time_of_day};

/// One record as it appears in a schedule file.
///
/// Keys other than the recognised calls (e.g. `dhuhr`, `asr`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// `DD-MM-YYYY`.
    pub date: String,
    pub fajr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl ScheduleRecord {
    fn raw_time(&self, call: CallVariant) -> Option<&str> {
        match call {
            CallVariant::Fajr => self.fajr.as_deref(),
            CallVariant::Maghrib => self.maghrib.as_deref(),
            CallVariant::Isha => self.isha.as_deref(),
        }
    }
}

/// Validated call times for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub calls: BTreeMap<CallVariant, NaiveTime>,
}

impl ScheduleEntry {
    /// Time of day for `call`, if the entry schedules it.
    #[must_use]
    pub fn call_time(&self, call: CallVariant) -> Option<NaiveTime> {
        self.calls.get(&call).copied()
    }
}

impl TryFrom<ScheduleRecord> for ScheduleEntry {
    type Error = ValidationError;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        let date = parse_date(&record.date)?;
        let mut calls = BTreeMap::new();
        for call in CallVariant::ALL {
            if let Some(raw) = record.raw_time(call) {
                calls.insert(call, parse_time_of_day(call, raw)?);
            }
        }
        Ok(Self { date, calls })
    }
}

/// Ordered sequence of entries with at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// A schedule with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a schedule from validated entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateDate`] if two entries share a date.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Result<Self, MinaretError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.date) {
                return Err(ValidationError::DuplicateDate(entry.date).into());
            }
        }
        Ok(Self { entries })
    }

    /// Validate raw records into a schedule.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a malformed date or time,
    /// or a duplicate date.
    pub fn from_records(records: Vec<ScheduleRecord>) -> Result<Self, MinaretError> {
        let entries = records
            .into_iter()
            .map(ScheduleEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Entry for `date`, if any.
    #[must_use]
    pub fn find(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
