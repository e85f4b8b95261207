use std::fmt::Debug;

use async_trait::async_trait;
use dao::swap::SwapRequestEntity;
use dao::MockTransaction;
use mockall::automock;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::permission::Authentication;
use crate::{ServiceError, ValidationFailureItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<dao::swap::SwapStatus> for SwapStatus {
    fn from(status: dao::swap::SwapStatus) -> Self {
        match status {
            dao::swap::SwapStatus::Pending => Self::Pending,
            dao::swap::SwapStatus::Approved => Self::Approved,
            dao::swap::SwapStatus::Rejected => Self::Rejected,
        }
    }
}
impl From<SwapStatus> for dao::swap::SwapStatus {
    fn from(status: SwapStatus) -> Self {
        match status {
            SwapStatus::Pending => Self::Pending,
            SwapStatus::Approved => Self::Approved,
            SwapStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requested_with_id: Uuid,
    pub original_shift_id: Uuid,
    pub status: SwapStatus,
    pub created: Option<PrimitiveDateTime>,
}

impl From<&SwapRequestEntity> for SwapRequest {
    fn from(entity: &SwapRequestEntity) -> Self {
        Self {
            id: entity.id,
            requester_id: entity.requester_id,
            requested_with_id: entity.requested_with_id,
            original_shift_id: entity.original_shift_id,
            status: entity.status.into(),
            created: Some(entity.created),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapCandidate {
    pub requester_id: Option<Uuid>,
    pub requested_with_id: Option<Uuid>,
    pub original_shift_id: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSwap {
    pub requester_id: Uuid,
    pub requested_with_id: Uuid,
    pub original_shift_id: Uuid,
}

impl SwapCandidate {
    pub fn validate(&self) -> Result<NewSwap, ServiceError> {
        let mut missing = Vec::new();
        if self.requester_id.is_none() {
            missing.push(ValidationFailureItem::MissingField("requester_id".into()));
        }
        if self.requested_with_id.is_none() {
            missing.push(ValidationFailureItem::MissingField(
                "requested_with_id".into(),
            ));
        }
        if self.original_shift_id.is_none() {
            missing.push(ValidationFailureItem::MissingField(
                "original_shift_id".into(),
            ));
        }
        if !missing.is_empty() {
            return Err(ServiceError::ValidationError(missing.into()));
        }
        Ok(NewSwap {
            requester_id: self.requester_id.ok_or(ServiceError::InternalError)?,
            requested_with_id: self.requested_with_id.ok_or(ServiceError::InternalError)?,
            original_shift_id: self.original_shift_id.ok_or(ServiceError::InternalError)?,
        })
    }
}

#[automock(type Context=(); type Transaction = MockTransaction;)]
#[async_trait]
pub trait SwapService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    /// Creates a Pending request. The referenced shift must exist.
    async fn request_swap(
        &self,
        candidate: &SwapCandidate,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<SwapRequest, ServiceError>;

    /// Pending -> Approved | Rejected, both terminal. Approval reassigns
    /// the referenced shift to `requested_with_id`.
    async fn update_swap_status(
        &self,
        id: Uuid,
        status: SwapStatus,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<SwapRequest, ServiceError>;
}
