use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::duration_minutes;

/// A booked interval on a specific date.
///
/// `(date, start)` is unique across all stored appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub start: NaiveTime,
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
}

impl Appointment {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn finishes_at(&self) -> NaiveDateTime {
        self.starts_at() + self.duration
    }
}

/// Insert payload for an appointment; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: NaiveDate,
    pub start: NaiveTime,
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
}

impl NewAppointment {
    pub fn from_start(start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            date: start.date(),
            start: start.time(),
            duration,
        }
    }

    pub fn with_id(self, id: i64) -> Appointment {
        Appointment {
            id,
            date: self.date,
            start: self.start,
            duration: self.duration,
        }
    }
}

/// A synthetic half-hour candidate returned by availability queries.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
}

impl AvailableSlot {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }
}
