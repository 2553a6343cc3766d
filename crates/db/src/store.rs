//! Collaborator traits for the scheduling core.
//!
//! The scheduling services talk to persistence through these seams so the
//! same update protocol runs against Postgres in production and against the
//! in-memory store in tests. `SlotStore::begin` models the optional
//! transaction capability: a backend that cannot open a multi-statement
//! transaction answers `None` and the update protocol degrades to manual
//! compensation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use bayan_core::models::appointment::UserIdentity;
use bayan_core::models::notification::NotificationEvent;

use crate::models::DbAppointmentSlot;

/// Writes staged inside one transaction. Dropping an uncommitted unit of
/// work discards its writes.
#[async_trait]
pub trait SlotUnitOfWork: Send {
    async fn find_exact(
        &mut self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>>;

    async fn delete_by_id(&mut self, id: Uuid) -> Result<u64>;

    /// All slots on a date, ordered by start time, as seen from inside the
    /// transaction.
    async fn slots_on_date(&mut self, date: DateTime<Utc>) -> Result<Vec<DbAppointmentSlot>>;

    async fn insert(&mut self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// The slot collection. Inserts preserve the id on the given row so a
/// deleted document can be restored verbatim during compensation; duplicate
/// keys on `(thread_id, date, start_time)` surface as errors.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Opens a unit of work, or `None` when the backend cannot.
    async fn begin(&self) -> Option<Box<dyn SlotUnitOfWork>>;

    async fn find_exact(
        &self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>>;

    async fn delete_by_id(&self, id: Uuid) -> Result<u64>;

    /// All slots on a date ordered by start time, optionally excluding one
    /// thread's own slots (so a thread can be validated against everyone
    /// except itself).
    async fn slots_on_date(
        &self,
        date: DateTime<Utc>,
        exclude_thread: Option<Uuid>,
    ) -> Result<Vec<DbAppointmentSlot>>;

    async fn slots_by_thread(&self, thread_id: Uuid) -> Result<Vec<DbAppointmentSlot>>;

    async fn delete_by_thread(&self, thread_id: Uuid) -> Result<u64>;

    async fn insert(&self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot>;

    async fn insert_many(&self, slots: Vec<DbAppointmentSlot>) -> Result<Vec<DbAppointmentSlot>>;

    /// Slots with `start_date <= date <= end_date`, ordered by date then
    /// start time.
    async fn slots_in_range(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Vec<DbAppointmentSlot>>;
}

/// Read-only identity lookup. A miss or a failure downstream becomes absent
/// denormalized fields, never a failed booking.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>>;
}

/// Records a notification for the resident after a schedule change.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: NotificationEvent) -> Result<()>;
}
