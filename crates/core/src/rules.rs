//! # Scheduling Rules
//!
//! Pure, synchronous checks shared by every scheduling operation. Nothing in
//! this module touches storage; the engine loads records and asks these
//! functions for a verdict.
//!
//! Time-of-day arithmetic is done on offsets from midnight so that an
//! interval running past 24:00 is treated as finishing late rather than
//! wrapping around to the early morning.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::models::AvailableSlot;

/// Duration used when a caller does not supply one.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Longest accepted appointment or kept slot (8 hours).
pub const MAX_DURATION_MINUTES: i64 = 8 * 60;

/// Granularity of availability candidates.
pub const SLOT_MINUTES: i64 = 30;

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 17;

/// Start of the reserved window on third-week Tuesdays.
pub const RESERVED_FROM_HOUR: u32 = 16;
const RESERVED_WEEK_OF_MONTH: u32 = 3;
const RESERVED_WEEKDAY: Weekday = Weekday::Tue;

fn since_midnight(time: NaiveTime) -> Duration {
    Duration::seconds(i64::from(time.num_seconds_from_midnight()))
}

fn hours(hour: u32) -> Duration {
    Duration::hours(i64::from(hour))
}

/// Half-open interval intersection: touching intervals do not overlap.
pub fn has_overlap(
    start1: NaiveTime,
    duration1: Duration,
    start2: NaiveTime,
    duration2: Duration,
) -> bool {
    let start1 = since_midnight(start1);
    let start2 = since_midnight(start2);

    start1 + duration1 > start2 && start1 < start2 + duration2
}

pub fn is_valid_duration(duration_minutes: i64) -> bool {
    duration_minutes > 0 && duration_minutes <= MAX_DURATION_MINUTES
}

/// Week number of `date` within its month.
///
/// Computed as `(day + weekday) / 7 + 1` with a Sunday-origin weekday index,
/// which is not the ISO week. For Tuesdays this puts week 3 on the 12th
/// through the 18th of the month.
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() + date.weekday().num_days_from_sunday()) / 7 + 1
}

/// Tuesdays of the third week lose the 16:00 to 17:00 window.
pub fn is_reserved_day(date: NaiveDate) -> bool {
    date.weekday() == RESERVED_WEEKDAY && week_of_month(date) == RESERVED_WEEK_OF_MONTH
}

/// Business-hours rule shared by appointment creation and availability.
///
/// The interval must start at or after 09:00 and finish by 17:00 on the same
/// day; on a reserved day it must also finish by 16:00.
pub fn is_valid_interval(start: NaiveDateTime, duration: Duration) -> bool {
    let finish = since_midnight(start.time()) + duration;

    if start.hour() < OPENING_HOUR || finish > hours(CLOSING_HOUR) {
        return false;
    }

    if is_reserved_day(start.date()) && finish > hours(RESERVED_FROM_HOUR) {
        return false;
    }

    true
}

/// Business-hours rule for kept slots. Kept slots recur daily, so the
/// reserved-day window does not apply to them.
pub fn is_within_business_hours(start: NaiveTime, duration: Duration) -> bool {
    start.hour() >= OPENING_HOUR && since_midnight(start) + duration <= hours(CLOSING_HOUR)
}

/// Every half-hour candidate between opening and closing for `date`,
/// in chronological order.
pub fn nine_to_five(date: NaiveDate) -> Vec<AvailableSlot> {
    let opening = i64::from(OPENING_HOUR) * 60;
    let closing = i64::from(CLOSING_HOUR) * 60;

    (opening..=closing - SLOT_MINUTES)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|minute| NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0))
        .map(|start| AvailableSlot {
            date,
            start,
            duration: Duration::minutes(SLOT_MINUTES),
        })
        .collect()
}
