//! Schedule-file error type.

use std::path::PathBuf;

use minaret_domain::error::MinaretError;

/// Errors originating from reading a schedule file.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleFileError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of schedule records.
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ScheduleFileError> for MinaretError {
    fn from(err: ScheduleFileError) -> Self {
        Self::ScheduleSource(Box::new(err))
    }
}
