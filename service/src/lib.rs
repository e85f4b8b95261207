use std::sync::Arc;

use thiserror::Error;
use time::PrimitiveDateTime;
use uuid::Uuid;

pub mod availability;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod interval;
pub mod permission;
pub mod shift;
pub mod swap;
pub mod user_service;
pub mod uuid_service;

pub use permission::{Authentication, MockPermissionService, PermissionService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailureItem {
    #[error("Missing required field: {0}")]
    MissingField(Arc<str>),
    #[error("Invalid value: {0}")]
    InvalidValue(Arc<str>),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("Validation error: {0:?}")]
    ValidationError(Arc<[ValidationFailureItem]>),

    #[error("Start time {0} must be before end time {1}")]
    TimeOrderWrong(PrimitiveDateTime, PrimitiveDateTime),

    #[error("Employee already has a conflicting shift for this time")]
    ShiftConflict {
        shift_id: Uuid,
        employee_name: Option<Arc<str>>,
    },

    #[error("Employee is on approved leave for this date")]
    EmployeeOnLeave {
        leave_id: Uuid,
        employee_name: Option<Arc<str>>,
    },

    #[error("Swap request {0} has already been resolved")]
    SwapAlreadyResolved(Uuid),

    #[error("Internal error")]
    InternalError,
}
