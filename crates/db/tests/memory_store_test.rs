use bayan_core::time::normalize_date;
use bayan_db::mock::memory::MemorySlotStore;
use bayan_db::models::DbAppointmentSlot;
use bayan_db::store::SlotStore;
use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn slot(thread_id: Uuid, date: &str, start: &str, end: &str) -> DbAppointmentSlot {
    DbAppointmentSlot {
        id: Uuid::new_v4(),
        thread_id,
        resident_id: None,
        resident_name: None,
        resident_barangay_id: None,
        staff_id: None,
        staff_name: None,
        staff_barangay_id: None,
        date: normalize_date(date).expect("test date must parse"),
        start_time: start.to_string(),
        end_time: end.to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_insert_enforces_thread_day_start_uniqueness() {
    let store = MemorySlotStore::new();
    let thread = Uuid::new_v4();

    store
        .insert(slot(thread, "2025-12-01", "09:00", "09:30"))
        .await
        .expect("first insert should succeed");

    let duplicate = store
        .insert(slot(thread, "2025-12-01", "09:00", "10:00"))
        .await;
    assert!(duplicate.is_err(), "same thread/date/start must collide");

    // Another thread may hold the same date and start time.
    store
        .insert(slot(Uuid::new_v4(), "2025-12-01", "09:00", "09:30"))
        .await
        .expect("other thread is not a duplicate");
}

#[tokio::test]
async fn test_slots_on_date_orders_and_excludes() {
    let store = MemorySlotStore::new();
    let mine = Uuid::new_v4();
    let theirs = Uuid::new_v4();
    let date = normalize_date("2025-12-01").unwrap();

    store.insert(slot(mine, "2025-12-01", "10:00", "10:30")).await.unwrap();
    store.insert(slot(theirs, "2025-12-01", "08:30", "09:00")).await.unwrap();
    store.insert(slot(theirs, "2025-12-02", "08:30", "09:00")).await.unwrap();

    let all = store.slots_on_date(date, None).await.unwrap();
    let starts: Vec<&str> = all.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(starts, vec!["08:30", "10:00"]);

    let others = store.slots_on_date(date, Some(mine)).await.unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].thread_id, theirs);
}

#[tokio::test]
async fn test_delete_by_thread_reports_removed_count() {
    let store = MemorySlotStore::new();
    let thread = Uuid::new_v4();

    store.insert(slot(thread, "2025-12-01", "09:00", "09:30")).await.unwrap();
    store.insert(slot(thread, "2025-12-02", "09:00", "09:30")).await.unwrap();
    store.insert(slot(Uuid::new_v4(), "2025-12-01", "10:00", "10:30")).await.unwrap();

    assert_eq!(store.delete_by_thread(thread).await.unwrap(), 2);
    assert!(store.slots_by_thread(thread).await.unwrap().is_empty());
    assert_eq!(store.all().len(), 1);
}

#[tokio::test]
async fn test_slots_in_range_is_inclusive() {
    let store = MemorySlotStore::new();
    let thread = Uuid::new_v4();

    for date in ["2025-11-30", "2025-12-01", "2025-12-03", "2025-12-04"] {
        store.insert(slot(thread, date, "09:00", "09:30")).await.unwrap();
    }

    let found = store
        .slots_in_range(
            normalize_date("2025-12-01").unwrap(),
            normalize_date("2025-12-03").unwrap(),
        )
        .await
        .unwrap();
    let dates: Vec<_> = found.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![
            normalize_date("2025-12-01").unwrap(),
            normalize_date("2025-12-03").unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_plain_store_has_no_transaction_capability() {
    let store = MemorySlotStore::new();
    assert!(store.begin().await.is_none());
}

#[tokio::test]
async fn test_transactional_commit_publishes_staged_writes() {
    let store = MemorySlotStore::transactional();
    let thread = Uuid::new_v4();
    let existing = slot(thread, "2025-12-01", "09:00", "09:30");
    store.insert(existing.clone()).await.unwrap();

    let mut uow = store.begin().await.expect("transactional store must begin");
    assert_eq!(uow.delete_by_id(existing.id).await.unwrap(), 1);
    uow.insert(slot(thread, "2025-12-01", "10:00", "10:30")).await.unwrap();

    // Nothing is visible outside the unit of work until commit.
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].start_time, "09:00");

    uow.commit().await.unwrap();
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].start_time, "10:00");
}

#[tokio::test]
async fn test_transactional_rollback_discards_staged_writes() {
    let store = MemorySlotStore::transactional();
    let thread = Uuid::new_v4();
    let existing = slot(thread, "2025-12-01", "09:00", "09:30");
    store.insert(existing.clone()).await.unwrap();

    let mut uow = store.begin().await.unwrap();
    uow.delete_by_id(existing.id).await.unwrap();
    uow.rollback().await.unwrap();

    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].id, existing.id);
}
