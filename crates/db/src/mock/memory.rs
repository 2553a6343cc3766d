//! In-memory collaborator implementations for tests.
//!
//! `MemorySlotStore` mirrors the Postgres store's observable behavior: the
//! `(thread_id, date, start_time)` unique key, start-time ordering, and the
//! optional transaction capability. By default `begin` answers `None`, which
//! drives the update protocol down its manual-compensation path; the
//! `transactional` constructor stages writes against a snapshot and swaps it
//! in on commit, exercising the transactional path instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use uuid::Uuid;

use bayan_core::models::appointment::UserIdentity;
use bayan_core::models::notification::NotificationEvent;

use crate::models::DbAppointmentSlot;
use crate::store::{Directory, NotificationSink, SlotStore, SlotUnitOfWork};

fn insert_into(rows: &mut Vec<DbAppointmentSlot>, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot> {
    let duplicate = rows.iter().any(|existing| {
        existing.thread_id == slot.thread_id
            && existing.date == slot.date
            && existing.start_time == slot.start_time
    });
    if duplicate {
        return Err(eyre!(
            "duplicate appointment slot for thread {} on {} at {}",
            slot.thread_id,
            slot.date,
            slot.start_time
        ));
    }
    rows.push(slot.clone());
    Ok(slot)
}

fn on_date(
    rows: &[DbAppointmentSlot],
    date: DateTime<Utc>,
    exclude_thread: Option<Uuid>,
) -> Vec<DbAppointmentSlot> {
    let mut found: Vec<DbAppointmentSlot> = rows
        .iter()
        .filter(|slot| slot.date == date)
        .filter(|slot| exclude_thread.is_none_or(|thread| slot.thread_id != thread))
        .cloned()
        .collect();
    found.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    found
}

#[derive(Clone)]
pub struct MemorySlotStore {
    rows: Arc<Mutex<Vec<DbAppointmentSlot>>>,
    transactional: bool,
}

impl MemorySlotStore {
    /// Store without transaction support: `begin` answers `None`.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            transactional: false,
        }
    }

    /// Store whose `begin` hands out staged-snapshot units of work.
    pub fn transactional() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            transactional: true,
        }
    }

    pub fn all(&self) -> Vec<DbAppointmentSlot> {
        self.rows.lock().unwrap().clone()
    }
}

impl Default for MemorySlotStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MemoryUnitOfWork {
    staged: Vec<DbAppointmentSlot>,
    target: Arc<Mutex<Vec<DbAppointmentSlot>>>,
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn begin(&self) -> Option<Box<dyn SlotUnitOfWork>> {
        if !self.transactional {
            return None;
        }
        Some(Box::new(MemoryUnitOfWork {
            staged: self.rows.lock().unwrap().clone(),
            target: Arc::clone(&self.rows),
        }))
    }

    async fn find_exact(
        &self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|slot| {
                slot.thread_id == thread_id
                    && slot.date == date
                    && slot.start_time == start_time
                    && slot.end_time == end_time
            })
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|slot| slot.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn slots_on_date(
        &self,
        date: DateTime<Utc>,
        exclude_thread: Option<Uuid>,
    ) -> Result<Vec<DbAppointmentSlot>> {
        Ok(on_date(&self.rows.lock().unwrap(), date, exclude_thread))
    }

    async fn slots_by_thread(&self, thread_id: Uuid) -> Result<Vec<DbAppointmentSlot>> {
        let mut found: Vec<DbAppointmentSlot> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.thread_id == thread_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        Ok(found)
    }

    async fn delete_by_thread(&self, thread_id: Uuid) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|slot| slot.thread_id != thread_id);
        Ok((before - rows.len()) as u64)
    }

    async fn insert(&self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot> {
        insert_into(&mut self.rows.lock().unwrap(), slot)
    }

    async fn insert_many(&self, slots: Vec<DbAppointmentSlot>) -> Result<Vec<DbAppointmentSlot>> {
        let mut rows = self.rows.lock().unwrap();
        let mut inserted = Vec::with_capacity(slots.len());
        for slot in slots {
            inserted.push(insert_into(&mut rows, slot)?);
        }
        Ok(inserted)
    }

    async fn slots_in_range(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Vec<DbAppointmentSlot>> {
        let mut found: Vec<DbAppointmentSlot> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.date >= start_date && slot.date <= end_date)
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        Ok(found)
    }
}

#[async_trait]
impl SlotUnitOfWork for MemoryUnitOfWork {
    async fn find_exact(
        &mut self,
        thread_id: Uuid,
        date: DateTime<Utc>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<DbAppointmentSlot>> {
        Ok(self
            .staged
            .iter()
            .find(|slot| {
                slot.thread_id == thread_id
                    && slot.date == date
                    && slot.start_time == start_time
                    && slot.end_time == end_time
            })
            .cloned())
    }

    async fn delete_by_id(&mut self, id: Uuid) -> Result<u64> {
        let before = self.staged.len();
        self.staged.retain(|slot| slot.id != id);
        Ok((before - self.staged.len()) as u64)
    }

    async fn slots_on_date(&mut self, date: DateTime<Utc>) -> Result<Vec<DbAppointmentSlot>> {
        Ok(on_date(&self.staged, date, None))
    }

    async fn insert(&mut self, slot: DbAppointmentSlot) -> Result<DbAppointmentSlot> {
        insert_into(&mut self.staged, slot)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        *self.target.lock().unwrap() = self.staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        // Staged writes are simply discarded.
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryDirectory {
    users: Arc<Mutex<HashMap<Uuid, UserIdentity>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: Uuid, display_name: &str, barangay_id: &str) {
        self.users.lock().unwrap().insert(
            id,
            UserIdentity {
                display_name: display_name.to_string(),
                barangay_id: barangay_id.to_string(),
            },
        );
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryNotifications {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MemoryNotifications {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
