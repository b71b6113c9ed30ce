use crate::models::{DbKeptSlot, minutes_column};
use calendar_core::models::KeptSlot;
use eyre::Result;
use sqlx::PgExecutor;

pub async fn create_kept_slot<'e, E>(executor: E, slot: &KeptSlot) -> Result<DbKeptSlot>
where
    E: PgExecutor<'e>,
{
    let duration_minutes = minutes_column(slot.duration)?;

    let row = sqlx::query_as::<_, DbKeptSlot>(
        r#"
        INSERT INTO kept_slots (start_time, duration_minutes)
        VALUES ($1, $2)
        RETURNING start_time, duration_minutes
        "#,
    )
    .bind(slot.start)
    .bind(duration_minutes)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_kept_slots<'e, E>(executor: E) -> Result<Vec<DbKeptSlot>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbKeptSlot>(
        r#"
        SELECT start_time, duration_minutes
        FROM kept_slots
        ORDER BY start_time ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
