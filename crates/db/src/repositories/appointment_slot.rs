//! Postgres-backed slot store.
//!
//! The SQL lives in executor-generic helpers so the pooled store and the
//! transactional unit of work run identical queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::DbAppointmentSlot;
use crate::store::{SlotStore, SlotUnitOfWork};

const SLOT_COLUMNS: &str = "id, thread_id, resident_id, resident_name, resident_barangay_id, \
     staff_id, staff_name, staff_barangay_id, date, start_time, end_time, created_at";

async fn find_exact<'e, E>(
    executor: E,
    thread_id: Uuid,
    date: DateTime<Utc>,
    start_time: &str,
    end_time: &str,
) -> Result<Option<DbAppointmentSlot>>
where
    E: PgExecutor<'e>,
{
    let slot = sqlx::query_as::<_, DbAppointmentSlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM appointment_slots
        WHERE thread_id = $1 AND date = $2 AND start_time = $3 AND end_time = $4
        "#,
    ))
    .bind(thread_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

async fn delete_by_id<'e, E>(executor: E, id: Uuid) -> Result<u64>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM appointment_slots WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

async fn slots_on_date<'e, E>(
    executor: E,
    date: DateTime<Utc>,
    exclude_thread: Option<Uuid>,
) -> Result<Vec<DbAppointmentSlot>>
where
    E: PgExecutor<'e>,
{
    let slots = sqlx::query_as::<_, DbAppointmentSlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM appointment_slots
        WHERE date = $1 AND ($2::uuid IS NULL OR thread_id <> $2)
        ORDER BY start_time ASC
        "#,
    ))
    .bind(date)
    .bind(exclude_thread)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

async fn insert<'e, E>(executor: E, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot>
where
    E: PgExecutor<'e>,
{
    let inserted = sqlx::query_as::<_, DbAppointmentSlot>(&format!(
        r#"
        INSERT INTO appointment_slots ({SLOT_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {SLOT_COLUMNS}
        "#,
    ))
    .bind(slot.id)
    .bind(slot.thread_id)
    .bind(slot.resident_id)
    .bind(slot.resident_name)
    .bind(slot.resident_barangay_id)
    .bind(slot.staff_id)
    .bind(slot.staff_name)
    .bind(slot.staff_barangay_id)
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.created_at)
    .fetch_one(executor)
    .await?;

    Ok(inserted)
}

pub struct PgSlotStore {
    pool: Pool<Postgres>,
}

impl PgSlotStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub struct PgSlotUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn begin(&self) -> Option<Box<dyn SlotUnitOfWork>> {
        match self.pool.begin().await {
            Ok(tx) => Some(Box::new(PgSlotUnitOfWork { tx })),
            Err(err) => {
                tracing::warn!(error = %err, "transactions unavailable, degrading to compensation");
                None
            }
        }
    }

    async fn find_exact(
        &self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>> {
        find_exact(&self.pool, thread_id, date, start_time, end_time).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        delete_by_id(&self.pool, id).await
    }

    async fn slots_on_date(
        &self,
        date: DateTime<Utc>,
        exclude_thread: Option<Uuid>,
    ) -> Result<Vec<DbAppointmentSlot>> {
        slots_on_date(&self.pool, date, exclude_thread).await
    }

    async fn slots_by_thread(&self, thread_id: Uuid) -> Result<Vec<DbAppointmentSlot>> {
        let slots = sqlx::query_as::<_, DbAppointmentSlot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS}
            FROM appointment_slots
            WHERE thread_id = $1
            ORDER BY date ASC, start_time ASC
            "#,
        ))
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn delete_by_thread(&self, thread_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM appointment_slots WHERE thread_id = $1")
            .bind(thread_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert(&self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot> {
        insert(&self.pool, slot).await
    }

    async fn insert_many(&self, slots: Vec<DbAppointmentSlot>) -> Result<Vec<DbAppointmentSlot>> {
        let mut inserted = Vec::with_capacity(slots.len());
        for slot in slots {
            inserted.push(insert(&self.pool, slot).await?);
        }
        Ok(inserted)
    }

    async fn slots_in_range(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Vec<DbAppointmentSlot>> {
        let slots = sqlx::query_as::<_, DbAppointmentSlot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS}
            FROM appointment_slots
            WHERE date >= $1 AND date <= $2
            ORDER BY date ASC, start_time ASC
            "#,
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }
}

#[async_trait]
impl SlotUnitOfWork for PgSlotUnitOfWork {
    async fn find_exact(
        &mut self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>> {
        find_exact(&mut *self.tx, thread_id, date, start_time, end_time).await
    }

    async fn delete_by_id(&mut self, id: Uuid) -> Result<u64> {
        delete_by_id(&mut *self.tx, id).await
    }

    async fn slots_on_date(&mut self, date: DateTime<Utc>) -> Result<Vec<DbAppointmentSlot>> {
        slots_on_date(&mut *self.tx, date, None).await
    }

    async fn insert(&mut self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot> {
        insert(&mut *self.tx, slot).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
