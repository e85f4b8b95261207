use crate::gen_service_impl;
use std::sync::Arc;

use async_trait::async_trait;
use dao::{employee::EmployeeDao, leave::LeaveDao, shift::ShiftDao, TransactionDao};
use service::{
    conflict::{Conflict, ConflictCheckService},
    interval::TimeInterval,
    ServiceError,
};
use time::Date;
use uuid::Uuid;

gen_service_impl! {
    struct ConflictCheckerImpl: ConflictCheckService = ConflictCheckerDeps {
        ShiftDao: ShiftDao<Transaction = Self::Transaction> = shift_dao,
        LeaveDao: LeaveDao<Transaction = Self::Transaction> = leave_dao,
        EmployeeDao: EmployeeDao<Transaction = Self::Transaction> = employee_dao,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

impl<Deps: ConflictCheckerDeps> ConflictCheckerImpl<Deps> {
    async fn employee_name(
        &self,
        employee_id: Uuid,
        tx: Deps::Transaction,
    ) -> Result<Option<Arc<str>>, ServiceError> {
        Ok(self
            .employee_dao
            .find_by_id(employee_id, tx)
            .await?
            .map(|employee| employee.name))
    }
}

#[async_trait]
impl<Deps: ConflictCheckerDeps> ConflictCheckService for ConflictCheckerImpl<Deps> {
    type Transaction = Deps::Transaction;

    async fn check_conflict(
        &self,
        employee_id: Uuid,
        date: Date,
        interval: &TimeInterval,
        exclude_shift_id: Option<Uuid>,
        tx: Option<Self::Transaction>,
    ) -> Result<Option<Conflict>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;

        // Shift conflicts are checked first and win over leave conflicts.
        let shifts = self
            .shift_dao
            .find_by_employee_and_date(employee_id, date, tx.clone())
            .await?;
        let blocking_shift = shifts
            .iter()
            .filter(|shift| exclude_shift_id != Some(shift.id))
            .find(|shift| {
                match TimeInterval::new(shift.start_time, shift.end_time) {
                    Ok(existing) => interval.overlaps(&existing),
                    // A persisted shift with a broken time range violates
                    // the store invariant; treat it as blocking.
                    Err(_) => true,
                }
            });

        let conflict = if let Some(shift) = blocking_shift {
            Some(Conflict::Shift {
                shift_id: shift.id,
                employee_name: self.employee_name(employee_id, tx.clone()).await?,
            })
        } else {
            let leaves = self
                .leave_dao
                .find_approved_by_employee_covering(employee_id, date, tx.clone())
                .await?;
            match leaves.iter().find(|leave| leave.covers(date)) {
                Some(leave) => Some(Conflict::Leave {
                    leave_id: leave.id,
                    employee_name: self.employee_name(employee_id, tx.clone()).await?,
                }),
                None => None,
            }
        };

        self.transaction_dao.commit(tx).await?;
        Ok(conflict)
    }
}
