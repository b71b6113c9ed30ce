use std::error::Error;

use chrono::{NaiveDate, NaiveTime};
use calendar_core::errors::{CalendarError, CalendarResult};

#[test]
fn test_calendar_error_display() {
    let invalid_duration = CalendarError::InvalidDuration(481);
    let invalid_range = CalendarError::InvalidTimeRange("2024-06-01 08:30 for 30 minutes".to_string());
    let kept = CalendarError::OverlapsKeptSlot(NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    let appointment = CalendarError::OverlapsAppointment {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        start: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
    };
    let database = CalendarError::Database(eyre::eyre!("connection refused"));

    assert_eq!(
        invalid_duration.to_string(),
        "Invalid duration: 481 minutes (expected 1 to 480)"
    );
    assert_eq!(
        invalid_range.to_string(),
        "Invalid time range: 2024-06-01 08:30 for 30 minutes"
    );
    assert_eq!(kept.to_string(), "Overlaps with the kept slot starting at 12:30:00");
    assert_eq!(
        appointment.to_string(),
        "Overlaps with the appointment on 2024-06-01 at 13:30:00"
    );
    assert!(database.to_string().contains("Database error:"));
}

#[test]
fn test_only_database_errors_are_fatal() {
    assert!(CalendarError::Database(eyre::eyre!("down")).is_fatal());
    assert!(!CalendarError::InvalidDuration(0).is_fatal());
    assert!(!CalendarError::OverlapsKeptSlot(NaiveTime::from_hms_opt(9, 0, 0).unwrap()).is_fatal());
}

#[test]
fn test_from_eyre_report() {
    let error: CalendarError = eyre::eyre!("store unreachable").into();

    assert!(matches!(error, CalendarError::Database(_)));
    assert!(error.source().is_some());
}

#[test]
fn test_calendar_result() {
    let result: CalendarResult<bool> = Ok(true);
    assert!(result.unwrap());

    let result: CalendarResult<bool> = Err(CalendarError::InvalidDuration(-5));
    assert!(result.is_err());
}
