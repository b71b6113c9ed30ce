//! In-memory [`CalendarStore`] for tests and database-less runs.
//!
//! Inserts and deletes are staged and only become visible once `commit`
//! applies them. Appointment ids are assigned from 1 upwards.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use calendar_core::models::{Appointment, KeptSlot, NewAppointment};
use calendar_core::store::CalendarStore;
use chrono::{NaiveDate, NaiveTime};
use eyre::{eyre, Result};

#[derive(Debug, Clone)]
enum Change {
    InsertAppointment(Appointment),
    InsertKeptSlot(KeptSlot),
    DeleteAppointment(i64),
}

#[derive(Debug, Default)]
struct MemoryState {
    appointments: BTreeMap<(NaiveDate, NaiveTime), Appointment>,
    kept_slots: BTreeMap<NaiveTime, KeptSlot>,
    pending: Vec<Change>,
    last_id: i64,
}

impl MemoryState {
    /// Applies every pending change or none of them.
    fn apply_pending(&mut self) -> Result<()> {
        let mut appointments = self.appointments.clone();
        let mut kept_slots = self.kept_slots.clone();

        for change in &self.pending {
            match change {
                Change::InsertAppointment(appointment) => {
                    let key = (appointment.date, appointment.start);
                    if appointments.contains_key(&key) {
                        return Err(eyre!(
                            "Duplicate appointment on {} at {}",
                            appointment.date,
                            appointment.start
                        ));
                    }
                    appointments.insert(key, appointment.clone());
                }
                Change::InsertKeptSlot(slot) => {
                    if kept_slots.contains_key(&slot.start) {
                        return Err(eyre!("Duplicate kept slot at {}", slot.start));
                    }
                    kept_slots.insert(slot.start, slot.clone());
                }
                Change::DeleteAppointment(id) => {
                    appointments.retain(|_, appointment| appointment.id != *id);
                }
            }
        }

        self.appointments = appointments;
        self.kept_slots = kept_slots;
        self.pending.clear();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| eyre!("In-memory store lock poisoned"))
    }

    /// Number of staged changes not yet committed.
    pub fn pending_changes(&self) -> Result<usize> {
        Ok(self.state()?.pending.len())
    }
}

#[async_trait]
impl CalendarStore for InMemoryStore {
    async fn list_appointments(&self, date: Option<NaiveDate>) -> Result<Vec<Appointment>> {
        let state = self.state()?;

        Ok(state
            .appointments
            .values()
            .filter(|appointment| date.is_none_or(|date| appointment.date == date))
            .cloned()
            .collect())
    }

    async fn list_kept_slots(&self) -> Result<Vec<KeptSlot>> {
        Ok(self.state()?.kept_slots.values().cloned().collect())
    }

    async fn find_appointment(&self, date: NaiveDate, start: NaiveTime) -> Result<Option<Appointment>> {
        Ok(self.state()?.appointments.get(&(date, start)).cloned())
    }

    async fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment> {
        let mut state = self.state()?;
        state.last_id += 1;

        let appointment = new.with_id(state.last_id);
        state.pending.push(Change::InsertAppointment(appointment.clone()));

        Ok(appointment)
    }

    async fn insert_kept_slot(&self, slot: KeptSlot) -> Result<KeptSlot> {
        self.state()?.pending.push(Change::InsertKeptSlot(slot.clone()));

        Ok(slot)
    }

    async fn delete_appointment(&self, appointment: &Appointment) -> Result<()> {
        self.state()?.pending.push(Change::DeleteAppointment(appointment.id));

        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut state = self.state()?;
        let result = state.apply_pending();
        if result.is_err() {
            state.pending.clear();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use tokio_test::{assert_err, assert_ok};

    fn new_appointment(hour: u32) -> NewAppointment {
        NewAppointment {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            start: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            duration: Duration::minutes(30),
        }
    }

    #[tokio::test]
    async fn test_changes_are_invisible_until_commit() {
        let store = InMemoryStore::new();

        let inserted = store.insert_appointment(new_appointment(10)).await.unwrap();
        assert_eq!(inserted.id, 1);
        assert!(store.list_appointments(None).await.unwrap().is_empty());
        assert_eq!(store.pending_changes().unwrap(), 1);

        assert_ok!(store.commit().await);
        assert_eq!(store.list_appointments(None).await.unwrap(), vec![inserted]);
        assert_eq!(store.pending_changes().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = InMemoryStore::new();

        let first = store.insert_appointment(new_appointment(10)).await.unwrap();
        store.commit().await.unwrap();
        store.delete_appointment(&first).await.unwrap();
        store.commit().await.unwrap();
        let second = store.insert_appointment(new_appointment(10)).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_duplicate_key_rejects_whole_commit() {
        let store = InMemoryStore::new();
        store.insert_appointment(new_appointment(10)).await.unwrap();
        store.commit().await.unwrap();

        store.insert_appointment(new_appointment(11)).await.unwrap();
        store.insert_appointment(new_appointment(10)).await.unwrap();

        assert_err!(store.commit().await);
        assert_eq!(store.list_appointments(None).await.unwrap().len(), 1);
        assert_eq!(store.pending_changes().unwrap(), 0);
    }
}
