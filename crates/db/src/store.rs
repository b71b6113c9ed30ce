//! PostgreSQL-backed [`CalendarStore`].
//!
//! Writes run inside a transaction that is opened on the first insert or
//! delete and held until `commit`. Reads go straight to the pool.

use async_trait::async_trait;
use calendar_core::models::{Appointment, KeptSlot, NewAppointment};
use calendar_core::store::CalendarStore;
use chrono::{NaiveDate, NaiveTime};
use eyre::{eyre, Result};
use sqlx::{Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use crate::DbPool;
use crate::repositories::{appointment, kept_slot};

type PendingTransaction = Option<Transaction<'static, Postgres>>;

pub struct PgCalendarStore {
    pool: DbPool,
    pending: Mutex<PendingTransaction>,
}

impl PgCalendarStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            pending: Mutex::new(None),
        }
    }

    async fn transaction(&self) -> Result<MutexGuard<'_, PendingTransaction>> {
        let mut pending = self.pending.lock().await;
        if pending.is_none() {
            tracing::debug!("Opening write transaction");
            *pending = Some(self.pool.begin().await?);
        }
        Ok(pending)
    }
}

/// Drops a transaction that a failed statement has aborted, so the next
/// write starts a fresh one.
async fn roll_back(pending: &mut PendingTransaction) {
    if let Some(tx) = pending.take() {
        match tx.rollback().await {
            Ok(()) => tracing::debug!("Rolled back write transaction"),
            Err(e) => tracing::warn!("Failed to roll back write transaction: {}", e),
        }
    }
}

#[async_trait]
impl CalendarStore for PgCalendarStore {
    async fn list_appointments(&self, date: Option<NaiveDate>) -> Result<Vec<Appointment>> {
        let rows = match date {
            Some(date) => appointment::get_appointments_by_date(&self.pool, date).await?,
            None => appointment::get_appointments(&self.pool).await?,
        };

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn list_kept_slots(&self) -> Result<Vec<KeptSlot>> {
        let rows = kept_slot::get_kept_slots(&self.pool).await?;

        Ok(rows.into_iter().map(KeptSlot::from).collect())
    }

    async fn find_appointment(&self, date: NaiveDate, start: NaiveTime) -> Result<Option<Appointment>> {
        let row = appointment::get_appointment_by_start(&self.pool, date, start).await?;

        Ok(row.map(Appointment::from))
    }

    async fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment> {
        let mut pending = self.transaction().await?;
        let tx = pending.as_mut().ok_or_else(|| eyre!("No open transaction"))?;

        match appointment::create_appointment(&mut **tx, &new).await {
            Ok(row) => Ok(row.into()),
            Err(e) => {
                roll_back(&mut pending).await;
                Err(e)
            }
        }
    }

    async fn insert_kept_slot(&self, slot: KeptSlot) -> Result<KeptSlot> {
        let mut pending = self.transaction().await?;
        let tx = pending.as_mut().ok_or_else(|| eyre!("No open transaction"))?;

        match kept_slot::create_kept_slot(&mut **tx, &slot).await {
            Ok(row) => Ok(row.into()),
            Err(e) => {
                roll_back(&mut pending).await;
                Err(e)
            }
        }
    }

    async fn delete_appointment(&self, target: &Appointment) -> Result<()> {
        let mut pending = self.transaction().await?;
        let tx = pending.as_mut().ok_or_else(|| eyre!("No open transaction"))?;

        let result = appointment::delete_appointment_by_id(&mut **tx, target.id).await;
        if result.is_err() {
            roll_back(&mut pending).await;
        }
        result
    }

    async fn commit(&self) -> Result<()> {
        if let Some(tx) = self.pending.lock().await.take() {
            tx.commit().await?;
            tracing::debug!("Committed write transaction");
        }
        Ok(())
    }
}
