use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use bayan_core::models::notification::NotificationEvent;

use crate::store::NotificationSink;

pub struct PgNotifications {
    pool: Pool<Postgres>,
}

impl PgNotifications {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for PgNotifications {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        tracing::debug!(
            thread = %event.thread_id,
            kind = event.kind.as_str(),
            "recording appointment notification"
        );

        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, thread_id, kind, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.recipient_id)
        .bind(event.thread_id)
        .bind(event.kind.as_str())
        .bind(&event.body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
