use crate::models::{DbAppointment, minutes_column};
use calendar_core::models::NewAppointment;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use sqlx::PgExecutor;

pub async fn create_appointment<'e, E>(executor: E, appointment: &NewAppointment) -> Result<DbAppointment>
where
    E: PgExecutor<'e>,
{
    let duration_minutes = minutes_column(appointment.duration)?;

    tracing::debug!(
        "Creating appointment: date={}, start={}, duration_minutes={}",
        appointment.date, appointment.start, duration_minutes
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (date, start_time, duration_minutes)
        VALUES ($1, $2, $3)
        RETURNING id, date, start_time, duration_minutes
        "#,
    )
    .bind(appointment.date)
    .bind(appointment.start)
    .bind(duration_minutes)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_appointments<'e, E>(executor: E) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, date, start_time, duration_minutes
        FROM appointments
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_appointments_by_date<'e, E>(executor: E, date: NaiveDate) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, date, start_time, duration_minutes
        FROM appointments
        WHERE date = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_appointment_by_start<'e, E>(
    executor: E,
    date: NaiveDate,
    start: NaiveTime,
) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, date, start_time, duration_minutes
        FROM appointments
        WHERE date = $1 AND start_time = $2
        "#,
    )
    .bind(date)
    .bind(start)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn delete_appointment_by_id<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}
