use std::sync::Arc;

use calendar_core::{
    errors::CalendarError,
    models::{Appointment, KeptSlot, NewAppointment},
};
use calendar_db::mock::repositories::MockCalendarStore;
use calendar_scheduler::{config::SchedulerConfig, Scheduler};
use chrono::{Duration, NaiveDate, NaiveTime};
use mockall::predicate;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn scheduler(store: MockCalendarStore) -> Scheduler {
    Scheduler::new(Arc::new(store), SchedulerConfig::default())
}

#[tokio::test]
async fn test_create_inserts_then_commits() {
    let mut store = MockCalendarStore::new();
    let mut sequence = mockall::Sequence::new();

    store
        .expect_list_appointments()
        .with(predicate::eq(Some(date())))
        .times(1)
        .returning(|_| Ok(vec![]));
    store
        .expect_list_kept_slots()
        .times(1)
        .returning(|| Ok(vec![]));
    store
        .expect_insert_appointment()
        .withf(|new| new.start == time(10, 0) && new.duration == Duration::minutes(30))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|new: NewAppointment| Ok(new.with_id(42)));
    store
        .expect_commit()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|| Ok(()));

    let appointment = scheduler(store)
        .create(date().and_time(time(10, 0)), None)
        .await
        .unwrap();

    assert_eq!(appointment.id, 42);
}

#[tokio::test]
async fn test_existing_appointment_is_returned_without_writing() {
    let mut store = MockCalendarStore::new();
    let existing = Appointment {
        id: 7,
        date: date(),
        start: time(10, 0),
        duration: Duration::minutes(30),
    };
    let stored = existing.clone();

    store
        .expect_list_appointments()
        .returning(move |_| Ok(vec![stored.clone()]));
    store.expect_list_kept_slots().returning(|| Ok(vec![]));
    store.expect_insert_appointment().never();
    store.expect_commit().never();

    let appointment = scheduler(store)
        .create(date().and_time(time(10, 0)), Some(30))
        .await
        .unwrap();

    assert_eq!(appointment, existing);
}

#[tokio::test]
async fn test_validation_failures_never_reach_the_store() {
    let store = MockCalendarStore::new();
    let scheduler = scheduler(store);

    let result = scheduler.create(date().and_time(time(8, 0)), None).await;
    assert!(matches!(result, Err(CalendarError::InvalidTimeRange(_))));

    let result = scheduler.keep(time(10, 0), Some(0)).await;
    assert!(matches!(result, Err(CalendarError::InvalidDuration(0))));
}

#[tokio::test]
async fn test_store_failure_is_fatal_database_error() {
    let mut store = MockCalendarStore::new();
    store
        .expect_list_appointments()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    store.expect_insert_appointment().never();

    let result = scheduler(store)
        .create(date().and_time(time(10, 0)), None)
        .await;

    let error = result.unwrap_err();
    assert!(error.is_fatal());
    assert!(error.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_commit_failure_surfaces() {
    let mut store = MockCalendarStore::new();
    store.expect_list_kept_slots().returning(|| Ok(vec![]));
    store.expect_list_appointments().returning(|_| Ok(vec![]));
    store
        .expect_insert_kept_slot()
        .times(1)
        .returning(|slot: KeptSlot| Ok(slot));
    store
        .expect_commit()
        .times(1)
        .returning(|| Err(eyre::eyre!("disk full")));

    let result = scheduler(store).keep(time(12, 0), None).await;

    assert!(matches!(result, Err(CalendarError::Database(_))));
}

#[tokio::test]
async fn test_delete_missing_skips_write() {
    let mut store = MockCalendarStore::new();
    store
        .expect_find_appointment()
        .with(predicate::eq(date()), predicate::eq(time(11, 30)))
        .times(1)
        .returning(|_, _| Ok(None));
    store.expect_delete_appointment().never();
    store.expect_commit().never();

    let deleted = scheduler(store)
        .delete(date().and_time(time(11, 30)))
        .await
        .unwrap();

    assert!(!deleted);
}

#[tokio::test]
async fn test_delete_removes_found_appointment() {
    let mut store = MockCalendarStore::new();
    let found = Appointment {
        id: 3,
        date: date(),
        start: time(11, 30),
        duration: Duration::minutes(60),
    };

    store
        .expect_find_appointment()
        .returning(move |_, _| Ok(Some(found.clone())));
    store
        .expect_delete_appointment()
        .withf(|appointment: &Appointment| appointment.id == 3)
        .times(1)
        .returning(|_| Ok(()));
    store.expect_commit().times(1).returning(|| Ok(()));

    let deleted = scheduler(store)
        .delete(date().and_time(time(11, 30)))
        .await
        .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn test_keep_checks_appointments_on_every_date() {
    let mut store = MockCalendarStore::new();
    let other_day = Appointment {
        id: 1,
        date: NaiveDate::from_ymd_opt(2023, 12, 29).unwrap(),
        start: time(13, 0),
        duration: Duration::minutes(60),
    };

    store.expect_list_kept_slots().returning(|| Ok(vec![]));
    store
        .expect_list_appointments()
        .with(predicate::eq(None))
        .times(1)
        .returning(move |_| Ok(vec![other_day.clone()]));
    store.expect_insert_kept_slot().never();

    let result = scheduler(store).keep(time(13, 30), Some(30)).await;

    assert!(matches!(
        result,
        Err(CalendarError::OverlapsAppointment { start, .. }) if start == time(13, 0)
    ));
}
