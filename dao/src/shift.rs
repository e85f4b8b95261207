use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::{DaoError, MockTransaction};

/// One scheduled work shift for one employee on one calendar day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub start_time: PrimitiveDateTime,
    pub end_time: PrimitiveDateTime,
    pub role: Arc<str>,
    pub shift_type: Arc<str>,
    pub created: PrimitiveDateTime,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait ShiftDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<ShiftEntity>, DaoError>;
    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError>;
    async fn find_by_date(
        &self,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError>;
    /// Range query for the shift listing endpoint. All filters optional,
    /// date bounds inclusive, result ordered by date then start time.
    async fn find_in_range(
        &self,
        from: Option<Date>,
        to: Option<Date>,
        employee_id: Option<Uuid>,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &ShiftEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &ShiftEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    /// Hard delete. Shifts are never soft-deleted.
    async fn delete(&self, id: Uuid, tx: Self::Transaction) -> Result<(), DaoError>;
}
