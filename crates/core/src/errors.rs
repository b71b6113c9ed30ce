use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid duration: {0} minutes (expected 1 to 480)")]
    InvalidDuration(i64),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Overlaps with the kept slot starting at {0}")]
    OverlapsKeptSlot(NaiveTime),

    #[error("Overlaps with the appointment on {date} at {start}")]
    OverlapsAppointment { date: NaiveDate, start: NaiveTime },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl CalendarError {
    /// Store failures are fatal; everything else is a rejected request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CalendarError::Database(_))
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;
