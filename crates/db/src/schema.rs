use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table (resident and staff directory)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            display_name VARCHAR(255) NOT NULL,
            barangay_id VARCHAR(64) NOT NULL,
            role VARCHAR(32) NOT NULL DEFAULT 'resident',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointment_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointment_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            thread_id UUID NOT NULL,
            resident_id UUID NULL,
            resident_name VARCHAR(255) NULL,
            resident_barangay_id VARCHAR(64) NULL,
            staff_id UUID NULL,
            staff_name VARCHAR(255) NULL,
            staff_barangay_id VARCHAR(64) NULL,
            date TIMESTAMP WITH TIME ZONE NOT NULL,
            start_time VARCHAR(8) NOT NULL,
            end_time VARCHAR(8) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_thread_day_start UNIQUE (thread_id, date, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            recipient_id UUID NOT NULL,
            thread_id UUID NOT NULL,
            kind VARCHAR(16) NOT NULL,
            body TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointment_slots_date ON appointment_slots(date);
        CREATE INDEX IF NOT EXISTS idx_appointment_slots_thread_id ON appointment_slots(thread_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_recipient_id ON notifications(recipient_id);
        CREATE INDEX IF NOT EXISTS idx_users_barangay_id ON users(barangay_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
