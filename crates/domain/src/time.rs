//! Time and timestamp helpers.
//!
//! Schedule dates and call times are wall-clock values in the host's local
//! time zone. No time zone or DST conversion is applied.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::call::CallVariant;
use crate::error::ValidationError;

/// UTC timestamp used for log entries.
pub type Timestamp = DateTime<Utc>;

/// `strftime` pattern for schedule dates (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// `strftime` pattern for call times (`HH:MM`, 24-hour).
pub const TIME_FORMAT: &str = "%H:%M";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current local wall-clock time.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a `DD-MM-YYYY` schedule date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] unless `value` is exactly ten
/// characters and a real calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if value.len() != 10 {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parse an `HH:MM` call time.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] unless `value` is a zero-padded
/// 24-hour time.
pub fn parse_time_of_day(call: CallVariant, value: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        call,
        value: value.to_string(),
    };
    if value.len() != 5 || value.as_bytes()[2] != b':' {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| invalid())
}

/// Format a date the way schedule files spell it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a call time as `HH:MM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_parse_day_month_year() {
        let date = parse_date("05-03-2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    }

    #[test]
    fn should_reject_iso_date() {
        assert_eq!(
            parse_date("2025-03-05"),
            Err(ValidationError::InvalidDate("2025-03-05".to_string()))
        );
    }

    #[test]
    fn should_reject_unpadded_date() {
        assert!(parse_date("5-3-2025").is_err());
    }

    #[test]
    fn should_reject_impossible_date() {
        assert!(parse_date("31-02-2025").is_err());
    }

    #[test]
    fn should_parse_padded_time() {
        let time = parse_time_of_day(CallVariant::Maghrib, "18:05").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(18, 5, 0).unwrap());
    }

    #[test]
    fn should_reject_unpadded_time() {
        assert!(parse_time_of_day(CallVariant::Fajr, "5:12").is_err());
    }

    #[test]
    fn should_reject_out_of_range_time() {
        let err = parse_time_of_day(CallVariant::Isha, "24:10").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTime {
                call: CallVariant::Isha,
                value: "24:10".to_string(),
            }
        );
    }

    #[test]
    fn should_format_date_and_time_like_schedule_files() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let time = NaiveTime::from_hms_opt(6, 7, 0).unwrap();
        assert_eq!(format_date(date), "09-01-2025");
        assert_eq!(format_time(time), "06:07");
    }
}
