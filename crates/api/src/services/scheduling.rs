//! # Scheduling Service
//!
//! The appointment-slot core: store-backed range validation, whole-thread
//! schedule replacement, the single-slot update protocol, and the dashboard
//! summary queries.
//!
//! ## Update Protocol
//!
//! `update_appointment_slot_with_validation` moves one booking from an old
//! range to a new one without ever leaving the system with zero slots for a
//! move that failed, or with two overlapping slots:
//!
//! 1. Normalize both dates; bail out on garbage before touching the store.
//! 2. Ask the store for a unit of work. A backend without multi-document
//!    transactions answers `None` and the protocol degrades to manual
//!    compensation.
//! 3. Locate the exact old slot and keep a full copy as the backup.
//! 4. Delete it, taking it out of overlap consideration.
//! 5. Re-validate the new range (ordering + office hours).
//! 6. Re-check overlap against every other slot on the target date, skipping
//!    the backup's own id in case a stale read still returns the deleted row.
//! 7. Resolve display identities best-effort and insert the replacement.
//! 8. Commit when transactional; on any rejection or unexpected error, roll
//!    back, or re-insert the backup when no transaction was available.
//!
//! On the compensation path there is a window where a concurrent reader can
//! observe the slot as absent, and two concurrent updates can both pass the
//! overlap check against a stale snapshot. That weaker guarantee is an
//! accepted property of transactionless deployments, not something this
//! module papers over with extra locking.
//!
//! Every failure becomes a `SlotCheck { ok: false, message }`; the protocol
//! never lets an error escape to the caller.

use chrono::{DateTime, Timelike, Utc};
use eyre::Result;
use std::collections::HashSet;
use tracing::{error, warn};
use uuid::Uuid;

use bayan_core::models::appointment::{SlotCheck, SlotRange, TodaySummary, UserIdentity};
use bayan_core::time::{normalize_date, overlaps_any, start_of_day, to_minutes};
use bayan_core::validation::{check_range, messages, OFFICE_MINUTES};
use bayan_db::models::DbAppointmentSlot;
use bayan_db::store::{Directory, SlotStore, SlotUnitOfWork};

/// Validates a candidate range against office hours and the persisted slots
/// on `date`, excluding `exempt_thread`'s own slots when supplied.
///
/// Business rejections come back as `Ok(SlotCheck { ok: false, .. })`; only
/// store I/O failures surface as `Err`.
pub async fn validate_time_range(
    slots: &dyn SlotStore,
    start_time: &str,
    end_time: &str,
    date: &str,
    exempt_thread: Option<Uuid>,
) -> Result<SlotCheck> {
    let (start, end) = match check_range(start_time, end_time) {
        Ok(parsed) => parsed,
        Err(message) => return Ok(SlotCheck::rejected(message)),
    };

    // An unparsable date deliberately reports as an office-hours violation;
    // callers key off this message today, so it stays.
    let Some(day) = normalize_date(date) else {
        return Ok(SlotCheck::rejected(messages::OUTSIDE_OFFICE_HOURS));
    };

    let existing = slots.slots_on_date(day, exempt_thread).await?;
    let taken = overlaps_any(
        start,
        end,
        existing
            .iter()
            .map(|slot| (slot.start_time.as_str(), slot.end_time.as_str())),
    );
    if taken {
        return Ok(SlotCheck::rejected(messages::OVERLAPS_EXISTING));
    }

    Ok(SlotCheck::ok())
}

/// Replaces a thread's entire schedule.
///
/// Deletes every existing slot for the thread, then inserts the well-formed,
/// deduplicated entries. An empty or all-invalid payload therefore wipes the
/// thread's schedule; that is the contract, not an accident. Insert failures
/// (such as a racing duplicate key) propagate to the caller.
pub async fn upsert_appointment_slots(
    slots: &dyn SlotStore,
    directory: &dyn Directory,
    thread_id: Uuid,
    staff_id: Uuid,
    resident_id: Uuid,
    scheduled_dates: &[SlotRange],
) -> Result<Vec<DbAppointmentSlot>> {
    let staff = lookup_identity(directory, staff_id).await;
    let resident = lookup_identity(directory, resident_id).await;

    let mut rows = Vec::new();
    let mut seen: HashSet<(DateTime<Utc>, String)> = HashSet::new();
    for entry in scheduled_dates {
        // Drop incomplete entries rather than failing the whole request.
        if entry.start_time.trim().is_empty() || entry.end_time.trim().is_empty() {
            continue;
        }
        let Some(date) = normalize_date(&entry.date) else {
            continue;
        };
        if !seen.insert((date, entry.start_time.clone())) {
            continue;
        }
        rows.push(build_slot(
            thread_id,
            staff_id,
            staff.as_ref(),
            resident_id,
            resident.as_ref(),
            date,
            &entry.start_time,
            &entry.end_time,
        ));
    }

    slots.delete_by_thread(thread_id).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    slots.insert_many(rows).await
}

/// Moves one booking from `old_range` to `new_range` with rollback-on-failure
/// semantics. See the module docs for the full protocol.
pub async fn update_appointment_slot_with_validation(
    slots: &dyn SlotStore,
    directory: &dyn Directory,
    thread_id: Uuid,
    old_range: &SlotRange,
    new_range: &SlotRange,
    staff_id: Uuid,
    resident_id: Uuid,
) -> SlotCheck {
    let (Some(old_date), Some(new_date)) =
        (normalize_date(&old_range.date), normalize_date(&new_range.date))
    else {
        return SlotCheck::rejected(messages::INVALID_DATE);
    };

    let mut uow = slots.begin().await;
    let mut backup: Option<DbAppointmentSlot> = None;

    let outcome = drive_update(
        slots,
        directory,
        &mut uow,
        &mut backup,
        thread_id,
        old_date,
        old_range,
        new_date,
        new_range,
        staff_id,
        resident_id,
    )
    .await;

    match outcome {
        Ok(check) => check,
        Err(err) => {
            error!(thread = %thread_id, error = %err, "appointment slot update failed");
            if let Some(tx) = uow.take() {
                if let Err(abort_err) = tx.rollback().await {
                    error!(error = %abort_err, "failed to roll back slot update");
                }
            } else if let Some(slot) = backup {
                // Best-effort compensation; if this also fails the range is
                // left unbooked until an operator reconciles it.
                if let Err(restore_err) = slots.insert(slot).await {
                    error!(error = %restore_err, "failed to restore appointment slot after error");
                }
            }
            SlotCheck::rejected(messages::UPDATE_FAILED)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn drive_update(
    slots: &dyn SlotStore,
    directory: &dyn Directory,
    uow: &mut Option<Box<dyn SlotUnitOfWork>>,
    backup: &mut Option<DbAppointmentSlot>,
    thread_id: Uuid,
    old_date: DateTime<Utc>,
    old_range: &SlotRange,
    new_date: DateTime<Utc>,
    new_range: &SlotRange,
    staff_id: Uuid,
    resident_id: Uuid,
) -> Result<SlotCheck> {
    // Locate the exact slot being moved.
    let found = match uow.as_deref_mut() {
        Some(tx) => {
            tx.find_exact(thread_id, old_date, &old_range.start_time, &old_range.end_time)
                .await?
        }
        None => {
            slots
                .find_exact(thread_id, old_date, &old_range.start_time, &old_range.end_time)
                .await?
        }
    };
    let Some(current) = found else {
        if let Some(tx) = uow.take() {
            tx.rollback().await?;
        }
        return Ok(SlotCheck::rejected(messages::SLOT_NOT_FOUND));
    };
    *backup = Some(current.clone());

    // Remove it so it cannot conflict with its own replacement.
    match uow.as_deref_mut() {
        Some(tx) => tx.delete_by_id(current.id).await?,
        None => slots.delete_by_id(current.id).await?,
    };

    let (start, end) = match check_range(&new_range.start_time, &new_range.end_time) {
        Ok(parsed) => parsed,
        Err(message) => return reject(slots, uow, backup, message).await,
    };

    // Overlap re-check against everything else on the target date. The
    // backup's id is skipped in case a stale read still returns the row
    // deleted above.
    let on_day = match uow.as_deref_mut() {
        Some(tx) => tx.slots_on_date(new_date).await?,
        None => slots.slots_on_date(new_date, None).await?,
    };
    let taken = overlaps_any(
        start,
        end,
        on_day
            .iter()
            .filter(|slot| slot.id != current.id)
            .map(|slot| (slot.start_time.as_str(), slot.end_time.as_str())),
    );
    if taken {
        return reject(slots, uow, backup, messages::RANGE_TAKEN).await;
    }

    let staff = lookup_identity(directory, staff_id).await;
    let resident = lookup_identity(directory, resident_id).await;
    let replacement = build_slot(
        thread_id,
        staff_id,
        staff.as_ref(),
        resident_id,
        resident.as_ref(),
        new_date,
        &new_range.start_time,
        &new_range.end_time,
    );

    match uow.as_deref_mut() {
        Some(tx) => {
            tx.insert(replacement).await?;
        }
        None => {
            slots.insert(replacement).await?;
        }
    }
    if let Some(tx) = uow.take() {
        tx.commit().await?;
    }

    Ok(SlotCheck::ok())
}

/// Rejection path shared by the validation and overlap checks: roll the
/// transaction back, or re-insert the backup when there is none.
async fn reject(
    slots: &dyn SlotStore,
    uow: &mut Option<Box<dyn SlotUnitOfWork>>,
    backup: &Option<DbAppointmentSlot>,
    message: &str,
) -> Result<SlotCheck> {
    if let Some(tx) = uow.take() {
        tx.rollback().await?;
    } else if let Some(slot) = backup.clone() {
        if let Err(err) = slots.insert(slot).await {
            warn!(error = %err, "failed to restore appointment slot after rejected update");
        }
    }
    Ok(SlotCheck::rejected(message))
}

async fn lookup_identity(directory: &dyn Directory, user_id: Uuid) -> Option<UserIdentity> {
    match directory.identity(user_id).await {
        Ok(found) => found,
        Err(err) => {
            warn!(user = %user_id, error = %err, "identity lookup failed, booking without display fields");
            None
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_slot(
    thread_id: Uuid,
    staff_id: Uuid,
    staff: Option<&UserIdentity>,
    resident_id: Uuid,
    resident: Option<&UserIdentity>,
    date: DateTime<Utc>,
    start_time: &str,
    end_time: &str,
) -> DbAppointmentSlot {
    DbAppointmentSlot {
        id: Uuid::new_v4(),
        thread_id,
        resident_id: Some(resident_id),
        resident_name: resident.map(|identity| identity.display_name.clone()),
        resident_barangay_id: resident.map(|identity| identity.barangay_id.clone()),
        staff_id: Some(staff_id),
        staff_name: staff.map(|identity| identity.display_name.clone()),
        staff_barangay_id: staff.map(|identity| identity.barangay_id.clone()),
        date,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        created_at: Utc::now(),
    }
}

/// Window, in minutes, within which a slot counts as "upcoming" on the
/// today dashboard.
const UPCOMING_WINDOW_MINUTES: i32 = 120;

/// Dashboard rollup for the calendar day of `now` (UTC; local office time is
/// a deliberate non-concern here).
pub async fn today_summary(slots: &dyn SlotStore, now: DateTime<Utc>) -> Result<TodaySummary> {
    let today = start_of_day(now);
    let rows = slots.slots_on_date(today, None).await?;

    let booked_minutes: i32 = rows
        .iter()
        .filter_map(|slot| {
            match (to_minutes(&slot.start_time), to_minutes(&slot.end_time)) {
                (Some(start), Some(end)) if end > start => Some(end - start),
                _ => None,
            }
        })
        .sum();
    let remaining_minutes = (OFFICE_MINUTES - booked_minutes).max(0);

    let now_minutes = (now.hour() * 60 + now.minute()) as i32;
    let upcoming = rows
        .iter()
        .filter(|slot| {
            to_minutes(&slot.start_time).is_some_and(|start| {
                start >= now_minutes && start - now_minutes <= UPCOMING_WINDOW_MINUTES
            })
        })
        .map(DbAppointmentSlot::to_view)
        .collect();

    Ok(TodaySummary {
        date: bayan_core::time::format_ymd(today),
        total_slots: rows.len(),
        booked_minutes,
        remaining_minutes,
        open_blocks: remaining_minutes / 30,
        upcoming,
    })
}

/// Slots within the inclusive `[start_date, end_date]` window, projected for
/// clients. Bound parsing is the handler's job.
pub async fn slots_in_range(
    slots: &dyn SlotStore,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Vec<bayan_core::models::appointment::SlotView>> {
    let rows = slots.slots_in_range(start_date, end_date).await?;
    Ok(rows.iter().map(DbAppointmentSlot::to_view).collect())
}
