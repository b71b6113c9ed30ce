use async_trait::async_trait;
use calendar_core::models::{Appointment, KeptSlot, NewAppointment};
use calendar_core::store::CalendarStore;
use chrono::{NaiveDate, NaiveTime};
use mockall::mock;

// Mock store for testing
mock! {
    pub CalendarStore {}

    #[async_trait]
    impl CalendarStore for CalendarStore {
        async fn list_appointments(
            &self,
            date: Option<NaiveDate>,
        ) -> eyre::Result<Vec<Appointment>>;

        async fn list_kept_slots(&self) -> eyre::Result<Vec<KeptSlot>>;

        async fn find_appointment(
            &self,
            date: NaiveDate,
            start: NaiveTime,
        ) -> eyre::Result<Option<Appointment>>;

        async fn insert_appointment(
            &self,
            appointment: NewAppointment,
        ) -> eyre::Result<Appointment>;

        async fn insert_kept_slot(&self, slot: KeptSlot) -> eyre::Result<KeptSlot>;

        async fn delete_appointment(&self, appointment: &Appointment) -> eyre::Result<()>;

        async fn commit(&self) -> eyre::Result<()>;
    }
}
