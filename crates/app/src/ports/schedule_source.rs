//! Schedule source port — reads the persisted schedule records.

use std::future::Future;
use std::sync::Arc;

use minaret_domain::error::MinaretError;
use minaret_domain::schedule::ScheduleRecord;

/// Persisted origin of the schedule, read once per arm.
pub trait ScheduleSource: Send + Sync {
    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;

    /// Read every record, unvalidated.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::ScheduleSource`] when the source cannot be
    /// read or decoded.
    fn load(&self) -> impl Future<Output = Result<Vec<ScheduleRecord>, MinaretError>> + Send;
}

impl<T: ScheduleSource> ScheduleSource for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load(&self) -> impl Future<Output = Result<Vec<ScheduleRecord>, MinaretError>> + Send {
        (**self).load()
    }
}
