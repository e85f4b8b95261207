use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    swap::{SwapRequestDao, SwapRequestEntity, SwapStatus},
    DaoError,
};
use sqlx::{query, query_as};
use time::{format_description::well_known::Iso8601, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct SwapRequestDb {
    id: Vec<u8>,
    requester_id: Vec<u8>,
    requested_with_id: Vec<u8>,
    original_shift_id: Vec<u8>,
    status: String,
    created: String,
}
impl TryFrom<&SwapRequestDb> for SwapRequestEntity {
    type Error = DaoError;
    fn try_from(swap: &SwapRequestDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(swap.id.as_ref())?,
            requester_id: Uuid::from_slice(swap.requester_id.as_ref())?,
            requested_with_id: Uuid::from_slice(swap.requested_with_id.as_ref())?,
            original_shift_id: Uuid::from_slice(swap.original_shift_id.as_ref())?,
            status: SwapStatus::from_db_str(&swap.status)?,
            created: PrimitiveDateTime::parse(&swap.created, &Iso8601::DATE_TIME)?,
        })
    }
}

pub struct SwapRequestDaoImpl {
    pub pool: Arc<sqlx::SqlitePool>,
}
impl SwapRequestDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwapRequestDao for SwapRequestDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<SwapRequestEntity>, DaoError> {
        let id_vec = id.as_bytes().to_vec();
        query_as::<_, SwapRequestDb>(
            "SELECT id, requester_id, requested_with_id, original_shift_id, status, created
               FROM swap_request WHERE id = ?",
        )
        .bind(id_vec)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(SwapRequestEntity::try_from)
        .transpose()
    }

    async fn create(
        &self,
        entity: &SwapRequestEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id_vec = entity.id.as_bytes().to_vec();
        let requester_id_vec = entity.requester_id.as_bytes().to_vec();
        let requested_with_id_vec = entity.requested_with_id.as_bytes().to_vec();
        let original_shift_id_vec = entity.original_shift_id.as_bytes().to_vec();
        let created_str = entity.created.format(&Iso8601::DATE_TIME).map_db_error()?;
        query(
            "INSERT INTO swap_request (id, requester_id, requested_with_id, original_shift_id, status, created, update_process)
               VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id_vec)
        .bind(requester_id_vec)
        .bind(requested_with_id_vec)
        .bind(original_shift_id_vec)
        .bind(entity.status.as_db_str())
        .bind(created_str)
        .bind(process)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn update(
        &self,
        entity: &SwapRequestEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id_vec = entity.id.as_bytes().to_vec();
        query("UPDATE swap_request SET status = ?, update_process = ? WHERE id = ?")
            .bind(entity.status.as_db_str())
            .bind(process)
            .bind(id_vec)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?;
        Ok(())
    }
}
