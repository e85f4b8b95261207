use crate::gen_service_impl;
use std::sync::Arc;

use async_trait::async_trait;
use dao::{employee::EmployeeDao, leave::LeaveDao, shift::ShiftDao, TransactionDao};
use service::{
    availability::{AvailabilityService, AvailabilityStatus, StaffAvailability},
    interval::TimeInterval,
    permission::{Authentication, PLANNER_PRIVILEGE, STAFF_PRIVILEGE},
    PermissionService, ServiceError,
};
use time::Date;
use tokio::join;

gen_service_impl! {
    struct AvailabilityServiceImpl: AvailabilityService = AvailabilityServiceDeps {
        EmployeeDao: EmployeeDao<Transaction = Self::Transaction> = employee_dao,
        ShiftDao: ShiftDao<Transaction = Self::Transaction> = shift_dao,
        LeaveDao: LeaveDao<Transaction = Self::Transaction> = leave_dao,
        PermissionService: PermissionService<Context = Self::Context> = permission_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

#[async_trait]
impl<Deps: AvailabilityServiceDeps> AvailabilityService for AvailabilityServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn get_availability(
        &self,
        date: Date,
        department: Option<Arc<str>>,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[StaffAvailability]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let (planner, staff) = join!(
            self.permission_service
                .check_permission(PLANNER_PRIVILEGE, context.clone()),
            self.permission_service
                .check_permission(STAFF_PRIVILEGE, context),
        );
        planner.or(staff)?;

        let employees = self.employee_dao.find_all(department, tx.clone()).await?;
        let shifts = self.shift_dao.find_by_date(date, tx.clone()).await?;
        let leaves = self
            .leave_dao
            .find_approved_covering(date, tx.clone())
            .await?;

        let report: Arc<[StaffAvailability]> = employees
            .iter()
            .map(|employee| {
                // Leave wins over a scheduled shift, a shift wins over free.
                let on_leave = leaves
                    .iter()
                    .any(|leave| leave.employee_id == employee.id && leave.covers(date));
                let shift = shifts
                    .iter()
                    .find(|shift| shift.employee_id == employee.id);
                let (status, scheduled_time) = if on_leave {
                    (AvailabilityStatus::OnLeave, None)
                } else if let Some(shift) = shift {
                    (
                        AvailabilityStatus::Scheduled,
                        TimeInterval::new(shift.start_time, shift.end_time).ok(),
                    )
                } else {
                    (AvailabilityStatus::Available, None)
                };
                StaffAvailability {
                    employee_id: employee.id,
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                    department: employee.department.clone(),
                    status,
                    scheduled_time,
                }
            })
            .collect();

        self.transaction_dao.commit(tx).await?;
        Ok(report)
    }
}
