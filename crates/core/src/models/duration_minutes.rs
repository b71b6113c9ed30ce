//! Serde adapter storing a `chrono::Duration` as whole minutes.

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(duration.num_minutes())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = i64::deserialize(deserializer)?;
    Ok(Duration::minutes(minutes))
}
