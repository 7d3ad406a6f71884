//! # minaret-adapter-schedule-json
//!
//! [`ScheduleSource`] backed by a JSON file holding an array of records:
//!
//! ```json
//! [
//!   { "date": "01-03-2025", "fajr": "05:12", "maghrib": "18:05", "isha": "19:30" }
//! ]
//! ```
//!
//! The file is re-read on every load, so edits are picked up at the next arm.
//!
//! ## Dependency rule
//!
//! Depends on `minaret-app` (port traits) and `minaret-domain` only.

mod error;

use std::path::{Path, PathBuf};

use minaret_app::ports::ScheduleSource;
use minaret_domain::error::MinaretError;
use minaret_domain::schedule::ScheduleRecord;

pub use error::ScheduleFileError;

/// Reads schedule records from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonScheduleSource {
    path: PathBuf,
}

impl JsonScheduleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<ScheduleRecord>, ScheduleFileError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ScheduleFileError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records: Vec<ScheduleRecord> =
            serde_json::from_slice(&bytes).map_err(|source| ScheduleFileError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "schedule file read");
        Ok(records)
    }
}

impl ScheduleSource for JsonScheduleSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<ScheduleRecord>, MinaretError> {
        Ok(self.read().await?)
    }
}
