use async_trait::async_trait;
use mockall::automock;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::{DaoError, MockTransaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapStatus {
    Pending,
    Approved,
    Rejected,
}

impl SwapStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "PENDING",
            SwapStatus::Approved => "APPROVED",
            SwapStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_db_str(value: &str) -> Result<Self, DaoError> {
        match value {
            "PENDING" => Ok(SwapStatus::Pending),
            "APPROVED" => Ok(SwapStatus::Approved),
            "REJECTED" => Ok(SwapStatus::Rejected),
            _ => Err(DaoError::EnumValueNotFound(value.into())),
        }
    }
}

/// Proposal to hand an existing shift over to another employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapRequestEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requested_with_id: Uuid,
    pub original_shift_id: Uuid,
    pub status: SwapStatus,
    pub created: PrimitiveDateTime,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait SwapRequestDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<SwapRequestEntity>, DaoError>;
    async fn create(
        &self,
        entity: &SwapRequestEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &SwapRequestEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
