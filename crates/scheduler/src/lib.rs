//! # Calendar Scheduler
//!
//! The scheduling engine: validates proposed appointments and kept slots,
//! detects overlaps and enumerates free half-hour slots for a day.
//!
//! ## Operation flow
//!
//! Every operation follows the same shape:
//!
//! 1. Validate the request with the pure checks in [`calendar_core::rules`]
//! 2. Load the relevant records from the [`CalendarStore`]
//! 3. Decide in memory
//! 4. Issue at most one insert or delete, then commit
//!
//! Steps 2 to 4 run under a single lock so that callers sharing one
//! [`Scheduler`] never interleave a read with another caller's write.

/// Engine defaults
pub mod config;

use std::sync::Arc;

use calendar_core::{
    errors::{CalendarError, CalendarResult},
    models::{Appointment, AvailableSlot, KeptSlot, NewAppointment},
    rules,
    store::CalendarStore,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;

pub struct Scheduler {
    store: Arc<dyn CalendarStore>,
    config: SchedulerConfig,
    write_lock: Mutex<()>,
}

impl Scheduler {
    pub fn new(store: Arc<dyn CalendarStore>, config: SchedulerConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    fn resolve_duration(&self, subject: &str, duration_minutes: Option<i64>) -> CalendarResult<Duration> {
        let minutes = duration_minutes.unwrap_or(self.config.default_duration_minutes);
        if !rules::is_valid_duration(minutes) {
            error!("Invalid {} duration minutes: {}", subject, minutes);
            return Err(CalendarError::InvalidDuration(minutes));
        }
        Ok(Duration::minutes(minutes))
    }

    /// Books an appointment starting at `start`.
    ///
    /// Re-creating an appointment with the same date, start and duration
    /// returns the stored one without writing.
    ///
    /// # Errors
    ///
    /// * `InvalidDuration` - duration outside 1 to 480 minutes
    /// * `InvalidTimeRange` - outside business hours or inside the reserved window
    /// * `OverlapsKeptSlot` / `OverlapsAppointment` - collides with a stored record
    pub async fn create(&self, start: NaiveDateTime, duration_minutes: Option<i64>) -> CalendarResult<Appointment> {
        let duration = self.resolve_duration("appointment", duration_minutes)?;
        if !rules::is_valid_interval(start, duration) {
            error!(
                "Invalid appointment start time: {} and/or duration: {} minutes",
                start,
                duration.num_minutes()
            );
            return Err(CalendarError::InvalidTimeRange(format!(
                "{} for {} minutes",
                start.format("%Y-%m-%d %H:%M"),
                duration.num_minutes()
            )));
        }

        let new = NewAppointment::from_start(start, duration);

        let _guard = self.write_lock.lock().await;
        let same_day = self.store.list_appointments(Some(new.date)).await?;
        let kept_slots = self.store.list_kept_slots().await?;

        if let Some(existing) = same_day
            .iter()
            .find(|app| app.start == new.start && app.duration == new.duration)
        {
            warn!(
                "Appointment starting at {} for {} minutes already exists",
                start,
                duration.num_minutes()
            );
            return Ok(existing.clone());
        }

        if let Some(slot) = kept_slots
            .iter()
            .find(|slot| rules::has_overlap(slot.start, slot.duration, new.start, new.duration))
        {
            error!("Appointment starting at {} overlaps with kept slot at {}", start, slot.start);
            return Err(CalendarError::OverlapsKeptSlot(slot.start));
        }

        if let Some(other) = same_day
            .iter()
            .find(|app| rules::has_overlap(app.start, app.duration, new.start, new.duration))
        {
            error!("Appointment starting at {} overlaps with the one at {}", start, other.starts_at());
            return Err(CalendarError::OverlapsAppointment {
                date: other.date,
                start: other.start,
            });
        }

        let appointment = self.store.insert_appointment(new).await?;
        self.store.commit().await?;

        info!("Created appointment {} starting at {}", appointment.id, start);
        Ok(appointment)
    }

    /// Removes the appointment at exactly `start`. Returns `false` when there
    /// is none; a missing appointment is not an error.
    pub async fn delete(&self, start: NaiveDateTime) -> CalendarResult<bool> {
        let _guard = self.write_lock.lock().await;

        match self.store.find_appointment(start.date(), start.time()).await? {
            Some(appointment) => {
                self.store.delete_appointment(&appointment).await?;
                self.store.commit().await?;

                info!("Deleted appointment {} starting at {}", appointment.id, start);
                Ok(true)
            }
            None => {
                warn!("Attempted to delete non-existent appointment starting at {}", start);
                Ok(false)
            }
        }
    }

    /// Free half-hour slots on `date` in chronological order.
    ///
    /// `max_slots` of `None` or `Some(0)` means no limit.
    pub async fn get_available(&self, date: NaiveDate, max_slots: Option<usize>) -> CalendarResult<Vec<AvailableSlot>> {
        let guard = self.write_lock.lock().await;
        let same_day = self.store.list_appointments(Some(date)).await?;
        let kept_slots = self.store.list_kept_slots().await?;
        drop(guard);

        let available = rules::nine_to_five(date).into_iter().filter(|candidate| {
            rules::is_valid_interval(candidate.starts_at(), candidate.duration)
                && !kept_slots
                    .iter()
                    .any(|slot| rules::has_overlap(candidate.start, candidate.duration, slot.start, slot.duration))
                && !same_day
                    .iter()
                    .any(|app| rules::has_overlap(candidate.start, candidate.duration, app.start, app.duration))
        });

        let available = match max_slots.filter(|&limit| limit > 0) {
            Some(limit) => available.take(limit).collect(),
            None => available.collect(),
        };

        Ok(available)
    }

    /// The earliest free slot on `date`, if any.
    pub async fn first_available(&self, date: NaiveDate) -> CalendarResult<Option<AvailableSlot>> {
        Ok(self.get_available(date, Some(1)).await?.into_iter().next())
    }

    /// Reserves `start` for the given duration on every day.
    ///
    /// Returns `false` when an identical kept slot already exists. Unlike
    /// [`Scheduler::create`], only the 09:00 to 17:00 bound applies here; the
    /// reserved window on third-week Tuesdays can be kept.
    ///
    /// # Errors
    ///
    /// * `InvalidDuration` - duration outside 1 to 480 minutes
    /// * `InvalidTimeRange` - outside business hours
    /// * `OverlapsKeptSlot` - collides with another kept slot
    /// * `OverlapsAppointment` - collides with an appointment on any date
    pub async fn keep(&self, start: NaiveTime, duration_minutes: Option<i64>) -> CalendarResult<bool> {
        let duration = self.resolve_duration("kept slot", duration_minutes)?;
        if !rules::is_within_business_hours(start, duration) {
            error!(
                "Invalid kept slot start time: {} and/or duration: {} minutes",
                start,
                duration.num_minutes()
            );
            return Err(CalendarError::InvalidTimeRange(format!(
                "{} for {} minutes",
                start.format("%H:%M"),
                duration.num_minutes()
            )));
        }

        let _guard = self.write_lock.lock().await;
        let kept_slots = self.store.list_kept_slots().await?;
        let appointments = self.store.list_appointments(None).await?;

        if kept_slots
            .iter()
            .any(|slot| slot.start == start && slot.duration == duration)
        {
            warn!("Kept slot starting at {} already exists", start);
            return Ok(false);
        }

        if let Some(slot) = kept_slots
            .iter()
            .find(|slot| rules::has_overlap(start, duration, slot.start, slot.duration))
        {
            error!("Kept slot starting at {} overlaps with the one at {}", start, slot.start);
            return Err(CalendarError::OverlapsKeptSlot(slot.start));
        }

        if let Some(app) = appointments
            .iter()
            .find(|app| rules::has_overlap(start, duration, app.start, app.duration))
        {
            error!(
                "Kept slot starting at {} overlaps with the appointment at {}",
                start,
                app.starts_at()
            );
            return Err(CalendarError::OverlapsAppointment {
                date: app.date,
                start: app.start,
            });
        }

        self.store.insert_kept_slot(KeptSlot { start, duration }).await?;
        self.store.commit().await?;

        info!("Kept slot starting at {} for {} minutes", start, duration.num_minutes());
        Ok(true)
    }
}
