//! Persistence contract consumed by the scheduling engine.
//!
//! Writes (`insert_*`, `delete_appointment`) are pending until `commit`
//! succeeds. Implementations live in `calendar-db`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;

use crate::models::{Appointment, KeptSlot, NewAppointment};

#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// All appointments, or only those on `date` when given.
    async fn list_appointments(&self, date: Option<NaiveDate>) -> Result<Vec<Appointment>>;

    async fn list_kept_slots(&self) -> Result<Vec<KeptSlot>>;

    /// Exact `(date, start)` lookup; duration is not part of the key.
    async fn find_appointment(&self, date: NaiveDate, start: NaiveTime) -> Result<Option<Appointment>>;

    /// Stages an insert and returns the record with its assigned id.
    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;

    async fn insert_kept_slot(&self, slot: KeptSlot) -> Result<KeptSlot>;

    async fn delete_appointment(&self, appointment: &Appointment) -> Result<()>;

    async fn commit(&self) -> Result<()>;
}
