use calendar_core::models::{Appointment, KeptSlot};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbKeptSlot {
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            date: row.date,
            start: row.start_time,
            duration: Duration::minutes(i64::from(row.duration_minutes)),
        }
    }
}

impl From<DbKeptSlot> for KeptSlot {
    fn from(row: DbKeptSlot) -> Self {
        KeptSlot {
            start: row.start_time,
            duration: Duration::minutes(i64::from(row.duration_minutes)),
        }
    }
}

/// Durations are validated to at most 8 hours before they reach the store.
pub(crate) fn minutes_column(duration: Duration) -> eyre::Result<i32> {
    i32::try_from(duration.num_minutes())
        .map_err(|_| eyre::eyre!("duration out of range: {} minutes", duration.num_minutes()))
}
