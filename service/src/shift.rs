use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dao::shift::ShiftEntity;
use dao::MockTransaction;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::interval::TimeInterval;
use crate::permission::Authentication;
use crate::{ServiceError, ValidationFailureItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shift {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub start_time: PrimitiveDateTime,
    pub end_time: PrimitiveDateTime,
    pub role: Arc<str>,
    pub shift_type: Arc<str>,
    pub created: Option<PrimitiveDateTime>,
}

impl From<&ShiftEntity> for Shift {
    fn from(entity: &ShiftEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            role: entity.role.clone(),
            shift_type: entity.shift_type.clone(),
            created: Some(entity.created),
        }
    }
}

/// Untrusted creation input. Every field is optional so that a partially
/// specified candidate is representable and can be rejected with a precise
/// validation failure instead of a deserialization error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftCandidate {
    pub employee_id: Option<Uuid>,
    pub date: Option<Date>,
    pub start_time: Option<PrimitiveDateTime>,
    pub end_time: Option<PrimitiveDateTime>,
    pub role: Option<Arc<str>>,
    pub shift_type: Option<Arc<str>>,
}

/// A candidate that passed validation: all fields present, interval ordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewShift {
    pub employee_id: Uuid,
    pub date: Date,
    pub interval: TimeInterval,
    pub role: Arc<str>,
    pub shift_type: Arc<str>,
}

impl ShiftCandidate {
    pub fn validate(&self) -> Result<NewShift, ServiceError> {
        let mut missing = Vec::new();
        if self.employee_id.is_none() {
            missing.push(ValidationFailureItem::MissingField("employee_id".into()));
        }
        if self.date.is_none() {
            missing.push(ValidationFailureItem::MissingField("date".into()));
        }
        if self.start_time.is_none() {
            missing.push(ValidationFailureItem::MissingField("start_time".into()));
        }
        if self.end_time.is_none() {
            missing.push(ValidationFailureItem::MissingField("end_time".into()));
        }
        if self.role.is_none() {
            missing.push(ValidationFailureItem::MissingField("role".into()));
        }
        if self.shift_type.is_none() {
            missing.push(ValidationFailureItem::MissingField("shift_type".into()));
        }
        if !missing.is_empty() {
            return Err(ServiceError::ValidationError(missing.into()));
        }

        let interval = TimeInterval::new(
            self.start_time.ok_or(ServiceError::InternalError)?,
            self.end_time.ok_or(ServiceError::InternalError)?,
        )?;
        Ok(NewShift {
            employee_id: self.employee_id.ok_or(ServiceError::InternalError)?,
            date: self.date.ok_or(ServiceError::InternalError)?,
            interval,
            role: self.role.clone().ok_or(ServiceError::InternalError)?,
            shift_type: self.shift_type.clone().ok_or(ServiceError::InternalError)?,
        })
    }
}

/// Partial update. Absent fields keep their persisted values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftPatch {
    pub date: Option<Date>,
    pub start_time: Option<PrimitiveDateTime>,
    pub end_time: Option<PrimitiveDateTime>,
    pub role: Option<Arc<str>>,
    pub shift_type: Option<Arc<str>>,
}

impl ShiftPatch {
    /// True if the patch moves the shift in time and therefore requires a
    /// fresh conflict check.
    pub fn changes_times(&self) -> bool {
        self.date.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

/// Filters for the shift listing. Date bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftQuery {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub employee_id: Option<Uuid>,
    pub department: Option<Arc<str>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    MissingFields,
    TimeOrderWrong,
    ShiftConflict,
    LeaveConflict,
    StorageError,
}

impl RejectionReason {
    /// Wire-level reason strings, kept stable for API consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingFields => "Missing required fields",
            RejectionReason::TimeOrderWrong => "Start time must be before end time",
            RejectionReason::ShiftConflict => "Conflicting schedule exists",
            RejectionReason::LeaveConflict => "Employee on approved leave",
            RejectionReason::StorageError => "Storage error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkConflict {
    pub employee_id: Option<Uuid>,
    pub date: Option<Date>,
    pub employee_name: Option<Arc<str>>,
    pub reason: RejectionReason,
}

/// Itemized outcome of a bulk creation. `conflicts` preserves input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkResult {
    pub successful: u32,
    pub failed: u32,
    pub conflicts: Vec<BulkConflict>,
}

#[automock(type Context=(); type Transaction = MockTransaction;)]
#[async_trait]
pub trait ShiftService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    async fn get_shifts(
        &self,
        query: &ShiftQuery,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Shift]>, ServiceError>;
    async fn get_shift(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError>;
    async fn create_shift(
        &self,
        candidate: &ShiftCandidate,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError>;
    async fn update_shift(
        &self,
        id: Uuid,
        patch: &ShiftPatch,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Shift, ServiceError>;
    async fn delete_shift(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError>;
    async fn create_bulk(
        &self,
        candidates: &[ShiftCandidate],
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<BulkResult, ServiceError>;
}
