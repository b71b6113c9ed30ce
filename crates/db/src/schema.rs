use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            duration_minutes INTEGER NOT NULL,
            CONSTRAINT appointments_date_start_unique UNIQUE (date, start_time),
            CONSTRAINT valid_duration CHECK (duration_minutes > 0 AND duration_minutes <= 480)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create kept_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kept_slots (
            start_time TIME PRIMARY KEY,
            duration_minutes INTEGER NOT NULL,
            CONSTRAINT valid_duration CHECK (duration_minutes > 0 AND duration_minutes <= 480)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
