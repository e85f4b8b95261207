use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rota_utils::DateRange;
use time::Date;
use uuid::Uuid;

use crate::{DaoError, MockTransaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_db_str(value: &str) -> Result<Self, DaoError> {
        match value {
            "PENDING" => Ok(LeaveStatus::Pending),
            "APPROVED" => Ok(LeaveStatus::Approved),
            "REJECTED" => Ok(LeaveStatus::Rejected),
            _ => Err(DaoError::EnumValueNotFound(value.into())),
        }
    }
}

/// Leave requests are owned by the leave subsystem. The scheduling core
/// only ever reads them, so this DAO has no write operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaveEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub status: LeaveStatus,
}

impl LeaveEntity {
    /// Leave is whole-day granular: the inclusive `[start_date, end_date]`
    /// range covers the day. A reversed range covers nothing.
    pub fn covers(&self, day: Date) -> bool {
        DateRange::new(self.start_date, self.end_date)
            .map(|range| range.contains(day))
            .unwrap_or(false)
    }
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait LeaveDao {
    type Transaction: crate::Transaction;

    /// Approved leave for one employee whose inclusive date range covers `date`.
    async fn find_approved_by_employee_covering(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[LeaveEntity]>, DaoError>;
    /// Approved leave of any employee covering `date`.
    async fn find_approved_covering(
        &self,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[LeaveEntity]>, DaoError>;
}
