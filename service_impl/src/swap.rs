use crate::gen_service_impl;

use async_trait::async_trait;
use dao::{shift::ShiftDao, swap::SwapRequestDao, swap::SwapRequestEntity, TransactionDao};
use service::{
    clock::ClockService,
    config::ConfigService,
    conflict::ConflictCheckService,
    interval::TimeInterval,
    permission::{Authentication, PLANNER_PRIVILEGE, STAFF_PRIVILEGE},
    swap::{SwapCandidate, SwapRequest, SwapService, SwapStatus},
    uuid_service::UuidService,
    PermissionService, ServiceError, ValidationFailureItem,
};
use tokio::join;
use uuid::Uuid;

const SWAP_SERVICE_PROCESS: &str = "swap-service";

gen_service_impl! {
    struct SwapServiceImpl: SwapService = SwapServiceDeps {
        SwapRequestDao: SwapRequestDao<Transaction = Self::Transaction> = swap_request_dao,
        ShiftDao: ShiftDao<Transaction = Self::Transaction> = shift_dao,
        ConflictCheckService: ConflictCheckService<Transaction = Self::Transaction> = conflict_check_service,
        ConfigService: ConfigService = config_service,
        PermissionService: PermissionService<Context = Self::Context> = permission_service,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

impl<Deps: SwapServiceDeps> SwapServiceImpl<Deps> {
    async fn check_staff_or_planner(
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
impl<Deps: SwapServiceDeps> SwapService for SwapServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn request_swap(
        &self,
        candidate: &SwapCandidate,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<SwapRequest, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.check_staff_or_planner(context).await?;

        let new_swap = candidate.validate()?;
        self.shift_dao
            .find_by_id(new_swap.original_shift_id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(new_swap.original_shift_id))?;

        let entity = SwapRequestEntity {
            id: self.uuid_service.new_uuid("SwapService::request id"),
            requester_id: new_swap.requester_id,
            requested_with_id: new_swap.requested_with_id,
            original_shift_id: new_swap.original_shift_id,
            status: dao::swap::SwapStatus::Pending,
            created: self.clock_service.date_time_now(),
        };
        self.swap_request_dao
            .create(&entity, SWAP_SERVICE_PROCESS, tx.clone())
            .await?;

        self.transaction_dao.commit(tx).await?;
        Ok(SwapRequest::from(&entity))
    }

    async fn update_swap_status(
        &self,
        id: Uuid,
        status: SwapStatus,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<SwapRequest, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.check_staff_or_planner(context).await?;

        if status == SwapStatus::Pending {
            return Err(ServiceError::ValidationError(
                [ValidationFailureItem::InvalidValue("status".into())].into(),
            ));
        }

        let swap = self
            .swap_request_dao
            .find_by_id(id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;
        if swap.status != dao::swap::SwapStatus::Pending {
            return Err(ServiceError::SwapAlreadyResolved(id));
        }

        if status == SwapStatus::Approved {
            let shift = self
                .shift_dao
                .find_by_id(swap.original_shift_id, tx.clone())
                .await?
                .ok_or(ServiceError::EntityNotFound(swap.original_shift_id))?;

            if self.config_service.get_config().await?.revalidate_swap_approvals {
                let interval = TimeInterval::new(shift.start_time, shift.end_time)?;
                if let Some(conflict) = self
                    .conflict_check_service
                    .check_conflict(
                        swap.requested_with_id,
                        shift.date,
                        &interval,
                        Some(shift.id),
                        Some(tx.clone()),
                    )
                    .await?
                {
                    return Err(conflict.into());
                }
            }

            let reassigned = dao::shift::ShiftEntity {
                employee_id: swap.requested_with_id,
                ..shift
            };
            self.shift_dao
                .update(&reassigned, SWAP_SERVICE_PROCESS, tx.clone())
                .await?;
        }

        let entity = SwapRequestEntity {
            status: status.into(),
            ..swap
        };
        self.swap_request_dao
            .update(&entity, SWAP_SERVICE_PROCESS, tx.clone())
            .await?;

        self.transaction_dao.commit(tx).await?;
        Ok(SwapRequest::from(&entity))
    }
}
