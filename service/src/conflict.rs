use std::sync::Arc;

use async_trait::async_trait;
use dao::MockTransaction;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::interval::TimeInterval;
use crate::ServiceError;

/// First blocking conflict found for a proposed shift. Shift conflicts are
/// reported before leave conflicts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conflict {
    Shift {
        shift_id: Uuid,
        employee_name: Option<Arc<str>>,
    },
    Leave {
        leave_id: Uuid,
        employee_name: Option<Arc<str>>,
    },
}

impl From<Conflict> for ServiceError {
    fn from(conflict: Conflict) -> Self {
        match conflict {
            Conflict::Shift {
                shift_id,
                employee_name,
            } => ServiceError::ShiftConflict {
                shift_id,
                employee_name,
            },
            Conflict::Leave {
                leave_id,
                employee_name,
            } => ServiceError::EmployeeOnLeave {
                leave_id,
                employee_name,
            },
        }
    }
}

/// Pure query + decision. Callers must construct the interval themselves,
/// so an out-of-order range never reaches the checker.
#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait ConflictCheckService {
    type Transaction: dao::Transaction;

    /// `exclude_shift_id` keeps an updated shift from conflicting with its
    /// own persisted state.
    async fn check_conflict(
        &self,
        employee_id: Uuid,
        date: Date,
        interval: &TimeInterval,
        exclude_shift_id: Option<Uuid>,
        tx: Option<Self::Transaction>,
    ) -> Result<Option<Conflict>, ServiceError>;
}
