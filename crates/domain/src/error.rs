//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`MinaretError`]
//! via `From`. Adapter errors are boxed so their concrete types never leak
//! across port boundaries.

use chrono::NaiveDate;

use crate::call::CallVariant;

/// Top-level error for the minaret workspace.
#[derive(Debug, thiserror::Error)]
pub enum MinaretError {
    /// A value failed domain validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced item does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The schedule source could not be read.
    #[error("schedule source error: {0}")]
    ScheduleSource(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The playback device could not be reached or rejected a command.
    #[error("device error: {0}")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A schedule date is not in `DD-MM-YYYY` form.
    #[error("invalid date {0:?}, expected DD-MM-YYYY")]
    InvalidDate(String),

    /// A call time is not in 24-hour `HH:MM` form.
    #[error("invalid time {value:?} for {call}, expected HH:MM")]
    InvalidTime { call: CallVariant, value: String },

    /// A call name is not one of the recognised variants.
    #[error("unknown call {0:?}")]
    UnknownCall(String),

    /// Two schedule entries share the same date.
    #[error("duplicate schedule entry for {0}")]
    DuplicateDate(NaiveDate),

    /// A device name was empty.
    #[error("device name must not be empty")]
    EmptyDeviceName,
}

/// Lookup failure for a named item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id:?} not found")]
pub struct NotFoundError {
    /// Kind of item that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier or name that was not found.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_include_validation_detail_in_display() {
        let err: MinaretError = ValidationError::InvalidDate("2025-03-01".to_string()).into();
        assert_eq!(
            err.to_string(),
            "validation error: invalid date \"2025-03-01\", expected DD-MM-YYYY"
        );
    }

    #[test]
    fn should_display_invalid_time_with_call_name() {
        let err = ValidationError::InvalidTime {
            call: CallVariant::Isha,
            value: "25:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid time \"25:00\" for isha, expected HH:MM"
        );
    }

    #[test]
    fn should_display_not_found_error() {
        let err: MinaretError = NotFoundError {
            entity: "Device",
            id: "Kitchen".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "not found: Device \"Kitchen\" not found");
    }

    #[test]
    fn should_include_boxed_source_in_device_error() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let err = MinaretError::Device(Box::new(io));
        assert_eq!(err.to_string(), "device error: connect timed out");
    }
}
