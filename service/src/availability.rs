use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dao::MockTransaction;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::interval::TimeInterval;
use crate::permission::Authentication;
use crate::ServiceError;

/// Leave takes precedence over scheduling: an employee with both an
/// approved leave and a shift on the same day reports `OnLeave`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Scheduled,
    OnLeave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffAvailability {
    pub employee_id: Uuid,
    pub name: Arc<str>,
    pub email: Arc<str>,
    pub department: Option<Arc<str>>,
    pub status: AvailabilityStatus,
    pub scheduled_time: Option<TimeInterval>,
}

/// Read-only projection over roster, shifts and approved leave. Trusts the
/// store; no conflict re-validation happens here.
#[automock(type Context=(); type Transaction = MockTransaction;)]
#[async_trait]
pub trait AvailabilityService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    async fn get_availability(
        &self,
        date: Date,
        department: Option<Arc<str>>,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[StaffAvailability]>, ServiceError>;
}
