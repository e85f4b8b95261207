use std::sync::Arc;

use crate::RestStateImpl;
use service::availability::{AvailabilityService, AvailabilityStatus};
use service::permission::Authentication;
use service::shift::{RejectionReason, ShiftCandidate, ShiftQuery, ShiftService};
use service::swap::{SwapCandidate, SwapService, SwapStatus};
use service::ServiceError;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::macros::{date, datetime};
use uuid::{uuid, Uuid};

type Auth = Authentication<rest::Context>;

fn alice_id() -> Uuid {
    uuid!("8C3F1E1D-0A37-4F52-9B7E-2D8C4A6B1F03")
}
fn bob_id() -> Uuid {
    uuid!("A1B2C3D4-5E6F-4A0B-8C1D-2E3F4A5B6C7D")
}

async fn setup() -> (Arc<SqlitePool>, RestStateImpl) {
    // One connection so every statement sees the same in-memory database.
    let pool = Arc::new(
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Could not open in-memory database"),
    );
    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");
    insert_employee(&pool, alice_id(), "Alice Carver", "alice@example.org", Some("kitchen")).await;
    insert_employee(&pool, bob_id(), "Bob Fischer", "bob@example.org", Some("kitchen")).await;
    let state = RestStateImpl::new(pool.clone());
    (pool, state)
}

async fn insert_employee(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    email: &str,
    department: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO employee (id, name, email, department, update_process) VALUES (?, ?, ?, ?, 'test')",
    )
    .bind(id.as_bytes().to_vec())
    .bind(name)
    .bind(email)
    .bind(department)
    .execute(pool)
    .await
    .expect("Could not insert employee");
}

async fn insert_approved_leave(pool: &SqlitePool, employee_id: Uuid, from: &str, to: &str) {
    sqlx::query(
        "INSERT INTO leave_request (id, employee_id, start_date, end_date, status, update_process)
           VALUES (?, ?, ?, ?, 'APPROVED', 'test')",
    )
    .bind(Uuid::new_v4().as_bytes().to_vec())
    .bind(employee_id.as_bytes().to_vec())
    .bind(from)
    .bind(to)
    .execute(pool)
    .await
    .expect("Could not insert leave");
}

fn candidate(
    employee_id: Uuid,
    start: time::PrimitiveDateTime,
    end: time::PrimitiveDateTime,
) -> ShiftCandidate {
    ShiftCandidate {
        employee_id: Some(employee_id),
        date: Some(start.date()),
        start_time: Some(start),
        end_time: Some(end),
        role: Some("cook".into()),
        shift_type: Some("regular".into()),
    }
}

#[tokio::test]
async fn test_overlap_rejected_and_boundary_allowed() {
    let (_pool, state) = setup().await;
    let service = &state.shift_service;

    service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
            Auth::Full,
            None,
        )
        .await
        .expect("First shift should be created");

    let overlap = service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-02 16:00), datetime!(2025-06-02 20:00)),
            Auth::Full,
            None,
        )
        .await;
    match overlap {
        Err(ServiceError::ShiftConflict { employee_name, .. }) => {
            assert_eq!(employee_name, Some("Alice Carver".into()));
        }
        other => panic!("Expected shift conflict, got {:?}", other.map(|s| s.id)),
    }

    // Touching the existing end is not an overlap.
    service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-02 17:00), datetime!(2025-06-02 20:00)),
            Auth::Full,
            None,
        )
        .await
        .expect("Boundary shift should be created");

    let shifts = service
        .get_shifts(&ShiftQuery::default(), Auth::Full, None)
        .await
        .expect("Listing should work");
    assert_eq!(shifts.len(), 2);
}

#[tokio::test]
async fn test_bulk_order_dependent_partial_failure() {
    let (_pool, state) = setup().await;
    let service = &state.shift_service;

    let batch = [
        candidate(alice_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
        candidate(bob_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
        candidate(alice_id(), datetime!(2025-06-02 16:00), datetime!(2025-06-02 20:00)),
    ];
    let result = service
        .create_bulk(&batch, Auth::Full, None)
        .await
        .expect("Bulk call itself should succeed");

    assert_eq!(result.successful, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].employee_id, Some(alice_id()));
    assert_eq!(result.conflicts[0].employee_name, Some("Alice Carver".into()));
    assert_eq!(result.conflicts[0].reason, RejectionReason::ShiftConflict);
    assert_eq!(
        result.conflicts[0].reason.as_str(),
        "Conflicting schedule exists"
    );

    // The two winners are persisted.
    let shifts = service
        .get_shifts(&ShiftQuery::default(), Auth::Full, None)
        .await
        .expect("Listing should work");
    assert_eq!(shifts.len(), 2);
}

#[tokio::test]
async fn test_shift_during_approved_leave_rejected() {
    let (pool, state) = setup().await;
    insert_approved_leave(&pool, alice_id(), "2025-06-01", "2025-06-03").await;

    let result = state
        .shift_service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
            Auth::Full,
            None,
        )
        .await;
    match result {
        Err(ServiceError::EmployeeOnLeave { employee_name, .. }) => {
            assert_eq!(employee_name, Some("Alice Carver".into()));
        }
        other => panic!("Expected leave conflict, got {:?}", other.map(|s| s.id)),
    }

    // Outside the leave range the same shape is fine.
    state
        .shift_service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-04 09:00), datetime!(2025-06-04 17:00)),
            Auth::Full,
            None,
        )
        .await
        .expect("Shift after leave should be created");
}

#[tokio::test]
async fn test_availability_report() {
    let (pool, state) = setup().await;
    insert_approved_leave(&pool, alice_id(), "2025-06-02", "2025-06-02").await;
    state
        .shift_service
        .create_shift(
            &candidate(bob_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
            Auth::Full,
            None,
        )
        .await
        .expect("Shift should be created");

    let report = state
        .availability_service
        .get_availability(date!(2025 - 06 - 02), None, Auth::Full, None)
        .await
        .expect("Report should build");

    assert_eq!(report.len(), 2);
    let alice = report
        .iter()
        .find(|entry| entry.employee_id == alice_id())
        .expect("Alice in report");
    assert_eq!(alice.status, AvailabilityStatus::OnLeave);
    let bob = report
        .iter()
        .find(|entry| entry.employee_id == bob_id())
        .expect("Bob in report");
    assert_eq!(bob.status, AvailabilityStatus::Scheduled);
    let scheduled = bob.scheduled_time.clone().expect("Bob has interval");
    assert_eq!(scheduled.start(), datetime!(2025-06-02 09:00));
    assert_eq!(scheduled.end(), datetime!(2025-06-02 17:00));
}

#[tokio::test]
async fn test_swap_lifecycle() {
    let (_pool, state) = setup().await;
    let shift = state
        .shift_service
        .create_shift(
            &candidate(alice_id(), datetime!(2025-06-02 09:00), datetime!(2025-06-02 17:00)),
            Auth::Full,
            None,
        )
        .await
        .expect("Shift should be created");

    let swap = state
        .swap_service
        .request_swap(
            &SwapCandidate {
                requester_id: Some(alice_id()),
                requested_with_id: Some(bob_id()),
                original_shift_id: Some(shift.id),
            },
            Auth::Full,
            None,
        )
        .await
        .expect("Swap request should be created");
    assert_eq!(swap.status, SwapStatus::Pending);

    let approved = state
        .swap_service
        .update_swap_status(swap.id, SwapStatus::Approved, Auth::Full, None)
        .await
        .expect("Approval should work");
    assert_eq!(approved.status, SwapStatus::Approved);

    // The shift now belongs to Bob.
    let reassigned = state
        .shift_service
        .get_shift(shift.id, Auth::Full, None)
        .await
        .expect("Shift still exists");
    assert_eq!(reassigned.employee_id, bob_id());

    // Both resolutions are terminal.
    let again = state
        .swap_service
        .update_swap_status(swap.id, SwapStatus::Rejected, Auth::Full, None)
        .await;
    assert!(matches!(again, Err(ServiceError::SwapAlreadyResolved(id)) if id == swap.id));
}

#[tokio::test]
async fn test_swap_request_for_unknown_shift_rejected() {
    let (_pool, state) = setup().await;
    let missing = Uuid::new_v4();
    let result = state
        .swap_service
        .request_swap(
            &SwapCandidate {
                requester_id: Some(alice_id()),
                requested_with_id: Some(bob_id()),
                original_shift_id: Some(missing),
            },
            Auth::Full,
            None,
        )
        .await;
    assert!(matches!(result, Err(ServiceError::EntityNotFound(id)) if id == missing));
}
