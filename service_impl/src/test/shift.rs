use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dao::employee::MockEmployeeDao;
use dao::shift::MockShiftDao;
use dao::{MockTransaction, MockTransactionDao};
use mockall::predicate::{always, eq};
use service::clock::MockClockService;
use service::conflict::{Conflict, MockConflictCheckService};
use service::permission::Authentication;
use service::shift::{RejectionReason, ShiftCandidate, ShiftPatch, ShiftQuery, ShiftService};
use service::uuid_service::MockUuidService;
use service::{MockPermissionService, ValidationFailureItem};
use time::macros::{date, datetime};
use uuid::{uuid, Uuid};

use crate::shift::ShiftServiceImpl;
use crate::test::conflict::{
    default_employee, default_employee_id, default_shift_entity, default_shift_id,
};
use crate::test::error_test::*;

pub fn alternate_employee_id() -> Uuid {
    uuid!("8E3B8426-6B7E-4E3B-95B0-8B9C61E9A7B3")
}
pub fn created_shift_id() -> Uuid {
    uuid!("D7A6ED1C-1E7C-4E0B-9F0B-6EA9C3F6E3AF")
}

pub fn default_candidate() -> ShiftCandidate {
    ShiftCandidate {
        employee_id: Some(default_employee_id()),
        date: Some(date!(2025 - 06 - 02)),
        start_time: Some(datetime!(2025-06-02 09:00)),
        end_time: Some(datetime!(2025-06-02 17:00)),
        role: Some("cook".into()),
        shift_type: Some("regular".into()),
    }
}

pub struct ShiftServiceDependencies {
    pub shift_dao: MockShiftDao,
    pub employee_dao: MockEmployeeDao,
    pub conflict_check_service: MockConflictCheckService,
    pub permission_service: MockPermissionService,
    pub clock_service: MockClockService,
    pub uuid_service: MockUuidService,
    pub transaction_dao: MockTransactionDao,
}
impl crate::shift::ShiftServiceDeps for ShiftServiceDependencies {
    type Context = ();
    type Transaction = MockTransaction;
    type ShiftDao = MockShiftDao;
    type EmployeeDao = MockEmployeeDao;
    type ConflictCheckService = MockConflictCheckService;
    type PermissionService = MockPermissionService;
    type ClockService = MockClockService;
    type UuidService = MockUuidService;
    type TransactionDao = MockTransactionDao;
}
impl ShiftServiceDependencies {
    pub fn build_service(self) -> ShiftServiceImpl<ShiftServiceDependencies> {
        ShiftServiceImpl::new(
            self.shift_dao.into(),
            self.employee_dao.into(),
            self.conflict_check_service.into(),
            self.permission_service.into(),
            self.clock_service.into(),
            self.uuid_service.into(),
            self.transaction_dao.into(),
        )
    }
}

pub fn build_dependencies(permission: bool, privilege: &'static str) -> ShiftServiceDependencies {
    let mut permission_service = MockPermissionService::new();
    permission_service
        .expect_check_permission()
        .with(eq(privilege), always())
        .returning(move |_, _| {
            if permission {
                Ok(())
            } else {
                Err(service::ServiceError::Forbidden)
            }
        });
    permission_service
        .expect_check_permission()
        .returning(|_, _| Err(service::ServiceError::Forbidden));

    let mut clock_service = MockClockService::new();
    clock_service
        .expect_date_time_now()
        .returning(generate_default_datetime);

    let mut transaction_dao = MockTransactionDao::new();
    transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    transaction_dao.expect_commit().returning(|_| Ok(()));

    ShiftServiceDependencies {
        shift_dao: MockShiftDao::new(),
        employee_dao: MockEmployeeDao::new(),
        conflict_check_service: MockConflictCheckService::new(),
        permission_service,
        clock_service,
        uuid_service: MockUuidService::new(),
        transaction_dao,
    }
}

#[tokio::test]
async fn test_create_shift() {
    let mut deps = build_dependencies(true, "planner");
    deps.uuid_service
        .expect_new_uuid()
        .with(eq("ShiftService::create id"))
        .returning(|_| created_shift_id());
    deps.conflict_check_service
        .expect_check_conflict()
        .withf(|employee_id, date, _interval, exclude, _tx| {
            *employee_id == default_employee_id()
                && *date == date!(2025 - 06 - 02)
                && exclude.is_none()
        })
        .returning(|_, _, _, _, _| Ok(None));
    deps.shift_dao
        .expect_create()
        .withf(|entity, process, _tx| {
            entity.id == created_shift_id()
                && entity.employee_id == default_employee_id()
                && entity.start_time == datetime!(2025-06-02 09:00)
                && entity.end_time == datetime!(2025-06-02 17:00)
                && process == "shift-service"
        })
        .returning(|_, _, _| Ok(()));
    let service = deps.build_service();

    let shift = service
        .create_shift(&default_candidate(), ().auth(), None)
        .await
        .unwrap();
    assert_eq!(shift.id, created_shift_id());
    assert_eq!(shift.role, "cook".into());
    assert_eq!(shift.created, Some(generate_default_datetime()));
}

#[tokio::test]
async fn test_create_shift_forbidden_for_staff() {
    let deps = build_dependencies(true, "staff");
    let service = deps.build_service();
    let result = service
        .create_shift(&default_candidate(), ().auth(), None)
        .await;
    test_forbidden(&result);
}

#[tokio::test]
async fn test_create_shift_missing_fields() {
    let deps = build_dependencies(true, "planner");
    let service = deps.build_service();
    let result = service
        .create_shift(&ShiftCandidate::default(), ().auth(), None)
        .await;
    test_validation_error(
        &result,
        &ValidationFailureItem::MissingField("employee_id".into()),
        6,
    );
}

#[tokio::test]
async fn test_create_shift_time_order_wrong() {
    let deps = build_dependencies(true, "planner");
    let service = deps.build_service();
    let candidate = ShiftCandidate {
        start_time: Some(datetime!(2025-06-02 17:00)),
        end_time: Some(datetime!(2025-06-02 09:00)),
        ..default_candidate()
    };
    let result = service.create_shift(&candidate, ().auth(), None).await;
    test_time_order_wrong(&result);
}

#[tokio::test]
async fn test_create_shift_rejects_on_conflict() {
    let mut deps = build_dependencies(true, "planner");
    deps.conflict_check_service
        .expect_check_conflict()
        .returning(|_, _, _, _, _| {
            Ok(Some(Conflict::Shift {
                shift_id: default_shift_id(),
                employee_name: Some("Alice Carver".into()),
            }))
        });
    let service = deps.build_service();
    let result = service
        .create_shift(&default_candidate(), ().auth(), None)
        .await;
    test_shift_conflict(&result, &default_shift_id());
}

#[tokio::test]
async fn test_get_shift_with_staff_privilege() {
    let mut deps = build_dependencies(true, "staff");
    deps.shift_dao
        .expect_find_by_id()
        .with(eq(default_shift_id()), eq(MockTransaction))
        .returning(|_, _| Ok(Some(default_shift_entity())));
    let service = deps.build_service();
    let shift = service
        .get_shift(default_shift_id(), ().auth(), None)
        .await
        .unwrap();
    assert_eq!(shift.id, default_shift_id());
    assert_eq!(shift.employee_id, default_employee_id());
}

#[tokio::test]
async fn test_get_shift_not_found() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(None));
    let service = deps.build_service();
    let result = service.get_shift(default_shift_id(), ().auth(), None).await;
    test_not_found(&result, &default_shift_id());
}

#[tokio::test]
async fn test_get_shifts_filters_by_department() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao.expect_find_in_range().returning(|_, _, _, _| {
        let foreign_shift = dao::shift::ShiftEntity {
            id: created_shift_id(),
            employee_id: alternate_employee_id(),
            ..default_shift_entity()
        };
        Ok([default_shift_entity(), foreign_shift].into())
    });
    deps.employee_dao
        .expect_find_all()
        .with(eq(Some(Arc::<str>::from("kitchen"))), eq(MockTransaction))
        .returning(|_, _| Ok([default_employee()].into()));
    let service = deps.build_service();

    let query = ShiftQuery {
        department: Some("kitchen".into()),
        ..ShiftQuery::default()
    };
    let shifts = service.get_shifts(&query, ().auth(), None).await.unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].employee_id, default_employee_id());
}

#[tokio::test]
async fn test_get_shifts_forbidden_without_any_privilege() {
    let deps = build_dependencies(false, "planner");
    let service = deps.build_service();
    let result = service
        .get_shifts(&ShiftQuery::default(), ().auth(), None)
        .await;
    test_forbidden(&result);
}

/// A patch that does not touch date or times must not run the conflict
/// checker. The mock has no expectations, so any call fails the test.
#[tokio::test]
async fn test_update_shift_role_only_skips_conflict_check() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_shift_entity())));
    deps.shift_dao
        .expect_update()
        .withf(|entity, process, _tx| {
            entity.id == default_shift_id()
                && entity.role.as_ref() == "supervisor"
                && entity.start_time == datetime!(2025-06-02 09:00)
                && process == "shift-service"
        })
        .returning(|_, _, _| Ok(()));
    let service = deps.build_service();

    let patch = ShiftPatch {
        role: Some("supervisor".into()),
        ..ShiftPatch::default()
    };
    let shift = service
        .update_shift(default_shift_id(), &patch, ().auth(), None)
        .await
        .unwrap();
    assert_eq!(shift.role, "supervisor".into());
}

#[tokio::test]
async fn test_update_shift_time_change_excludes_own_row() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_shift_entity())));
    deps.conflict_check_service
        .expect_check_conflict()
        .withf(|_, _, interval, exclude, _tx| {
            *exclude == Some(default_shift_id())
                && interval.start() == datetime!(2025-06-02 10:00)
                && interval.end() == datetime!(2025-06-02 17:00)
        })
        .returning(|_, _, _, _, _| Ok(None));
    deps.shift_dao.expect_update().returning(|_, _, _| Ok(()));
    let service = deps.build_service();

    let patch = ShiftPatch {
        start_time: Some(datetime!(2025-06-02 10:00)),
        ..ShiftPatch::default()
    };
    let shift = service
        .update_shift(default_shift_id(), &patch, ().auth(), None)
        .await
        .unwrap();
    assert_eq!(shift.start_time, datetime!(2025-06-02 10:00));
}

#[tokio::test]
async fn test_update_shift_not_found() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(None));
    let service = deps.build_service();
    let result = service
        .update_shift(default_shift_id(), &ShiftPatch::default(), ().auth(), None)
        .await;
    test_not_found(&result, &default_shift_id());
}

#[tokio::test]
async fn test_delete_shift() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_shift_entity())));
    deps.shift_dao
        .expect_delete()
        .with(eq(default_shift_id()), eq(MockTransaction))
        .returning(|_, _| Ok(()));
    let service = deps.build_service();
    service
        .delete_shift(default_shift_id(), ().auth(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_shift_not_found() {
    let mut deps = build_dependencies(true, "planner");
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(None));
    let service = deps.build_service();
    let result = service
        .delete_shift(default_shift_id(), ().auth(), None)
        .await;
    test_not_found(&result, &default_shift_id());
}

#[tokio::test]
async fn test_create_bulk_rejects_empty_batch() {
    let deps = build_dependencies(true, "planner");
    let service = deps.build_service();
    let result = service.create_bulk(&[], ().auth(), None).await;
    test_validation_error(&result, &ValidationFailureItem::InvalidValue("shifts".into()), 1);
}

/// Batch order decides who wins: the first candidate inserts, the second
/// overlapping one is rejected, and an invalid third is itemized without
/// aborting the batch.
#[tokio::test]
async fn test_create_bulk_is_order_dependent_and_item_isolated() {
    let mut deps = build_dependencies(true, "planner");
    deps.uuid_service
        .expect_new_uuid()
        .returning(|_| created_shift_id());

    let calls = AtomicU32::new(0);
    deps.conflict_check_service
        .expect_check_conflict()
        .returning(move |_, _, _, _, _| {
            // First candidate sees an empty day, the second collides with it.
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(Conflict::Shift {
                    shift_id: created_shift_id(),
                    employee_name: Some("Alice Carver".into()),
                }))
            }
        });
    deps.shift_dao
        .expect_create()
        .times(1)
        .returning(|_, _, _| Ok(()));
    let service = deps.build_service();

    let first = default_candidate();
    let second = ShiftCandidate {
        start_time: Some(datetime!(2025-06-02 16:00)),
        end_time: Some(datetime!(2025-06-02 20:00)),
        ..default_candidate()
    };
    let third = ShiftCandidate {
        employee_id: Some(alternate_employee_id()),
        ..ShiftCandidate::default()
    };
    let result = service
        .create_bulk(&[first, second, third], ().auth(), None)
        .await
        .unwrap();

    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 2);
    assert_eq!(result.conflicts.len(), 2);
    assert_eq!(result.conflicts[0].reason, RejectionReason::ShiftConflict);
    assert_eq!(result.conflicts[0].employee_id, Some(default_employee_id()));
    assert_eq!(result.conflicts[0].employee_name, Some("Alice Carver".into()));
    assert_eq!(result.conflicts[1].reason, RejectionReason::MissingFields);
    assert_eq!(result.conflicts[1].employee_id, Some(alternate_employee_id()));
    assert_eq!(result.conflicts[1].reason.as_str(), "Missing required fields");
}

#[tokio::test]
async fn test_create_bulk_itemizes_leave_conflicts() {
    let mut deps = build_dependencies(true, "planner");
    deps.conflict_check_service
        .expect_check_conflict()
        .returning(|_, _, _, _, _| {
            Ok(Some(Conflict::Leave {
                leave_id: default_shift_id(),
                employee_name: Some("Alice Carver".into()),
            }))
        });
    let service = deps.build_service();

    let result = service
        .create_bulk(&[default_candidate()], ().auth(), None)
        .await
        .unwrap();
    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 1);
    assert_eq!(result.conflicts[0].reason, RejectionReason::LeaveConflict);
    assert_eq!(
        result.conflicts[0].reason.as_str(),
        "Employee on approved leave"
    );
}

#[tokio::test]
async fn test_create_bulk_forbidden_for_staff() {
    let deps = build_dependencies(true, "staff");
    let service = deps.build_service();
    let result = service
        .create_bulk(&[default_candidate()], ().auth(), None)
        .await;
    test_forbidden(&result);
}

#[tokio::test]
async fn test_full_authentication_bypasses_permission_check() {
    let mut deps = build_dependencies(false, "planner");
    deps.permission_service.checkpoint();
    deps.permission_service
        .expect_check_permission()
        .returning(|_, context| match context {
            Authentication::Full => Ok(()),
            Authentication::Context(_) => Err(service::ServiceError::Forbidden),
        });
    deps.shift_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_shift_entity())));
    let service = deps.build_service();
    let shift = service
        .get_shift(default_shift_id(), Authentication::Full, None)
        .await
        .unwrap();
    assert_eq!(shift.id, default_shift_id());
}
