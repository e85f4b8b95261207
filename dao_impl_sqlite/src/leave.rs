use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    leave::{LeaveDao, LeaveEntity, LeaveStatus},
    DaoError,
};
use sqlx::query_as;
use time::{format_description::well_known::Iso8601, Date};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct LeaveDb {
    id: Vec<u8>,
    employee_id: Vec<u8>,
    start_date: String,
    end_date: String,
    status: String,
}
impl TryFrom<&LeaveDb> for LeaveEntity {
    type Error = DaoError;
    fn try_from(leave: &LeaveDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(leave.id.as_ref())?,
            employee_id: Uuid::from_slice(leave.employee_id.as_ref())?,
            start_date: Date::parse(&leave.start_date, &Iso8601::DATE)?,
            end_date: Date::parse(&leave.end_date, &Iso8601::DATE)?,
            status: LeaveStatus::from_db_str(&leave.status)?,
        })
    }
}

pub struct LeaveDaoImpl {
    pub pool: Arc<sqlx::SqlitePool>,
}
impl LeaveDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveDao for LeaveDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_approved_by_employee_covering(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[LeaveEntity]>, DaoError> {
        let employee_id_vec = employee_id.as_bytes().to_vec();
        let date_str = date.format(&Iso8601::DATE).map_db_error()?;
        query_as::<_, LeaveDb>(
            "SELECT id, employee_id, start_date, end_date, status FROM leave_request
               WHERE employee_id = ?1 AND status = 'APPROVED' AND start_date <= ?2 AND end_date >= ?2",
        )
        .bind(employee_id_vec)
        .bind(date_str)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(LeaveEntity::try_from)
        .collect::<Result<Arc<[LeaveEntity]>, DaoError>>()
    }

    async fn find_approved_covering(
        &self,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[LeaveEntity]>, DaoError> {
        let date_str = date.format(&Iso8601::DATE).map_db_error()?;
        query_as::<_, LeaveDb>(
            "SELECT id, employee_id, start_date, end_date, status FROM leave_request
               WHERE status = 'APPROVED' AND start_date <= ?1 AND end_date >= ?1",
        )
        .bind(date_str)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(LeaveEntity::try_from)
        .collect::<Result<Arc<[LeaveEntity]>, DaoError>>()
    }
}
