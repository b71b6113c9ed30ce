use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use super::duration_minutes;

/// A daily-recurring reserved interval, keyed by its start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeptSlot {
    pub start: NaiveTime,
    #[serde(with = "duration_minutes")]
    pub duration: Duration,
}
