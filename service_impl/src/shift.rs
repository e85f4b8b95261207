use crate::gen_service_impl;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dao::{employee::EmployeeDao, shift::ShiftDao, shift::ShiftEntity, TransactionDao};
use service::{
    clock::ClockService,
    conflict::ConflictCheckService,
    interval::TimeInterval,
    permission::{Authentication, PLANNER_PRIVILEGE, STAFF_PRIVILEGE},
    shift::{
        BulkConflict, BulkResult, RejectionReason, Shift, ShiftCandidate, ShiftPatch, ShiftQuery,
        ShiftService,
    },
    uuid_service::UuidService,
    PermissionService, ServiceError, ValidationFailureItem,
};
use tokio::join;
use uuid::Uuid;

const SHIFT_SERVICE_PROCESS: &str = "shift-service";

gen_service_impl! {
    struct ShiftServiceImpl: ShiftService = ShiftServiceDeps {
        ShiftDao: ShiftDao<Transaction = Self::Transaction> = shift_dao,
        EmployeeDao: EmployeeDao<Transaction = Self::Transaction> = employee_dao,
        ConflictCheckService: ConflictCheckService<Transaction = Self::Transaction> = conflict_check_service,
        PermissionService: PermissionService<Context = Self::Context> = permission_service,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

impl<Deps: ShiftServiceDeps> ShiftServiceImpl<Deps> {
    /// Validate, conflict-check and insert one candidate. Shared between
    /// the single and the bulk path so both reject for the same reasons.
    async fn try_create(
        &self,
        candidate: &ShiftCandidate,
        tx: Deps::Transaction,
    ) -> Result<ShiftEntity, ServiceError> {
        let new_shift = candidate.validate()?;
        if let Some(conflict) = self
            .conflict_check_service
            .check_conflict(
                new_shift.employee_id,
                new_shift.date,
                &new_shift.interval,
                None,
                Some(tx.clone()),
            )
            .await?
        {
            return Err(conflict.into());
        }

        let entity = ShiftEntity {
            id: self.uuid_service.new_uuid("ShiftService::create id"),
            employee_id: new_shift.employee_id,
            date: new_shift.date,
            start_time: new_shift.interval.start(),
            end_time: new_shift.interval.end(),
            role: new_shift.role,
            shift_type: new_shift.shift_type,
            created: self.clock_service.date_time_now(),
        };
        self.shift_dao
            .create(&entity, SHIFT_SERVICE_PROCESS, tx)
            .await?;
        Ok(entity)
    }

    async fn check_read_permission(
        &self,
        context: Authentication<Deps::Context>,
    ) -> Result<(), ServiceError> {
        let (planner, staff) = join!(
            self.permission_service
                .check_permission(PLANNER_PRIVILEGE, context.clone()),
            self.permission_service
                .check_permission(STAFF_PRIVILEGE, context),
        );
        planner.or(staff)
    }
}

#[async_trait]
impl<Deps: ShiftServiceDeps> ShiftService for ShiftServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn get_shifts(
        &self,
        query: &ShiftQuery,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Shift]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.check_read_permission(context).await?;

        let shifts = self
            .shift_dao
            .find_in_range(query.from, query.to, query.employee_id, tx.clone())
            .await?;
        let shifts: Arc<[Shift]> = if let Some(department) = query.department.clone() {
            let roster = self
                .employee_dao
                .find_all(Some(department), tx.clone())
                .await?;
            let roster_ids: HashSet<Uuid> = roster.iter().map(|employee| employee.id).collect();
            shifts
                .iter()
                .filter(|shift| roster_ids.contains(&shift.employee_id))
                .map(Shift::from)
                .collect()
        } else {
            shifts.iter().map(Shift::from).collect()
        };

        self.transaction_dao.commit(tx).await?;
        Ok(shifts)
    }

    async fn get_shift(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.check_read_permission(context).await?;

        let shift = self
            .shift_dao
            .find_by_id(id, tx.clone())
            .await?
            .as_ref()
            .map(Shift::from)
            .ok_or(ServiceError::EntityNotFound(id))?;

        self.transaction_dao.commit(tx).await?;
        Ok(shift)
    }

    async fn create_shift(
        &self,
        candidate: &ShiftCandidate,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.permission_service
            .check_permission(PLANNER_PRIVILEGE, context)
            .await?;

        let entity = self.try_create(candidate, tx.clone()).await?;

        self.transaction_dao.commit(tx).await?;
        Ok(Shift::from(&entity))
    }

    async fn update_shift(
        &self,
        id: Uuid,
        patch: &ShiftPatch,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.permission_service
            .check_permission(PLANNER_PRIVILEGE, context)
            .await?;

        let existing = self
            .shift_dao
            .find_by_id(id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;

        let date = patch.date.unwrap_or(existing.date);
        let start_time = patch.start_time.unwrap_or(existing.start_time);
        let end_time = patch.end_time.unwrap_or(existing.end_time);

        // A patch that does not move the shift in time cannot introduce a
        // conflict, so role or shift-type changes go through unchecked.
        if patch.changes_times() {
            let interval = TimeInterval::new(start_time, end_time)?;
            if let Some(conflict) = self
                .conflict_check_service
                .check_conflict(
                    existing.employee_id,
                    date,
                    &interval,
                    Some(id),
                    Some(tx.clone()),
                )
                .await?
            {
                return Err(conflict.into());
            }
        }

        let entity = ShiftEntity {
            date,
            start_time,
            end_time,
            role: patch.role.clone().unwrap_or_else(|| existing.role.clone()),
            shift_type: patch
                .shift_type
                .clone()
                .unwrap_or_else(|| existing.shift_type.clone()),
            ..existing
        };
        self.shift_dao
            .update(&entity, SHIFT_SERVICE_PROCESS, tx.clone())
            .await?;

        self.transaction_dao.commit(tx).await?;
        Ok(Shift::from(&entity))
    }

    async fn delete_shift(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.permission_service
            .check_permission(PLANNER_PRIVILEGE, context)
            .await?;

        self.shift_dao
            .find_by_id(id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.shift_dao.delete(id, tx.clone()).await?;

        self.transaction_dao.commit(tx).await?;
        Ok(())
    }

    async fn create_bulk(
        &self,
        candidates: &[ShiftCandidate],
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<BulkResult, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.permission_service
            .check_permission(PLANNER_PRIVILEGE, context)
            .await?;

        if candidates.is_empty() {
            return Err(ServiceError::ValidationError(
                [ValidationFailureItem::InvalidValue("shifts".into())].into(),
            ));
        }

        // Strictly sequential, one candidate at a time, all on the same
        // transaction: every insert is visible to the conflict check of the
        // candidates after it, so batch order decides who wins a conflict.
        let mut result = BulkResult::default();
        for candidate in candidates {
            match self.try_create(candidate, tx.clone()).await {
                Ok(_) => result.successful += 1,
                Err(err) => {
                    let (reason, employee_name) = match err {
                        ServiceError::ValidationError(_) => (RejectionReason::MissingFields, None),
                        ServiceError::TimeOrderWrong(_, _) => {
                            (RejectionReason::TimeOrderWrong, None)
                        }
                        ServiceError::ShiftConflict { employee_name, .. } => {
                            (RejectionReason::ShiftConflict, employee_name)
                        }
                        ServiceError::EmployeeOnLeave { employee_name, .. } => {
                            (RejectionReason::LeaveConflict, employee_name)
                        }
                        ServiceError::DatabaseQueryError(err) => {
                            tracing::error!("storage error during bulk shift creation: {}", err);
                            (RejectionReason::StorageError, None)
                        }
                        other => return Err(other),
                    };
                    result.failed += 1;
                    result.conflicts.push(BulkConflict {
                        employee_id: candidate.employee_id,
                        date: candidate.date,
                        employee_name,
                        reason,
                    });
                }
            }
        }

        self.transaction_dao.commit(tx).await?;
        Ok(result)
    }
}
