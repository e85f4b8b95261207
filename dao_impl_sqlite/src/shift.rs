use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    shift::{ShiftDao, ShiftEntity},
    DaoError,
};
use sqlx::{query, query_as};
use time::{format_description::well_known::Iso8601, Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct ShiftDb {
    id: Vec<u8>,
    employee_id: Vec<u8>,
    date: String,
    start_time: String,
    end_time: String,
    role: String,
    shift_type: String,
    created: String,
}
impl TryFrom<&ShiftDb> for ShiftEntity {
    type Error = DaoError;
    fn try_from(shift: &ShiftDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(shift.id.as_ref())?,
            employee_id: Uuid::from_slice(shift.employee_id.as_ref())?,
            date: Date::parse(&shift.date, &Iso8601::DATE)?,
            start_time: PrimitiveDateTime::parse(&shift.start_time, &Iso8601::DATE_TIME)?,
            end_time: PrimitiveDateTime::parse(&shift.end_time, &Iso8601::DATE_TIME)?,
            role: shift.role.as_str().into(),
            shift_type: shift.shift_type.as_str().into(),
            created: PrimitiveDateTime::parse(&shift.created, &Iso8601::DATE_TIME)?,
        })
    }
}

const SHIFT_COLUMNS: &str =
    "id, employee_id, date, start_time, end_time, role, shift_type, created";

pub struct ShiftDaoImpl {
    pub pool: Arc<sqlx::SqlitePool>,
}
impl ShiftDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftDao for ShiftDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<ShiftEntity>, DaoError> {
        let id_vec = id.as_bytes().to_vec();
        query_as::<_, ShiftDb>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shift WHERE id = ?"
        ))
        .bind(id_vec)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(ShiftEntity::try_from)
        .transpose()
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError> {
        let employee_id_vec = employee_id.as_bytes().to_vec();
        let date_str = date.format(&Iso8601::DATE).map_db_error()?;
        query_as::<_, ShiftDb>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shift WHERE employee_id = ? AND date = ? ORDER BY start_time"
        ))
        .bind(employee_id_vec)
        .bind(date_str)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(ShiftEntity::try_from)
        .collect::<Result<Arc<[ShiftEntity]>, DaoError>>()
    }

    async fn find_by_date(
        &self,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError> {
        let date_str = date.format(&Iso8601::DATE).map_db_error()?;
        query_as::<_, ShiftDb>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shift WHERE date = ? ORDER BY start_time"
        ))
        .bind(date_str)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(ShiftEntity::try_from)
        .collect::<Result<Arc<[ShiftEntity]>, DaoError>>()
    }

    // ISO dates compare lexicographically, so TEXT comparison is enough
    // for the range bounds.
    async fn find_in_range(
        &self,
        from: Option<Date>,
        to: Option<Date>,
        employee_id: Option<Uuid>,
        tx: Self::Transaction,
    ) -> Result<Arc<[ShiftEntity]>, DaoError> {
        let from_str = from
            .map(|date| date.format(&Iso8601::DATE))
            .transpose()
            .map_db_error()?;
        let to_str = to
            .map(|date| date.format(&Iso8601::DATE))
            .transpose()
            .map_db_error()?;
        let employee_id_vec = employee_id.map(|id| id.as_bytes().to_vec());
        query_as::<_, ShiftDb>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shift
               WHERE (?1 IS NULL OR date >= ?1)
                 AND (?2 IS NULL OR date <= ?2)
                 AND (?3 IS NULL OR employee_id = ?3)
               ORDER BY date, start_time"
        ))
        .bind(from_str)
        .bind(to_str)
        .bind(employee_id_vec)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(ShiftEntity::try_from)
        .collect::<Result<Arc<[ShiftEntity]>, DaoError>>()
    }

    async fn create(
        &self,
        entity: &ShiftEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id_vec = entity.id.as_bytes().to_vec();
        let employee_id_vec = entity.employee_id.as_bytes().to_vec();
        let date_str = entity.date.format(&Iso8601::DATE).map_db_error()?;
        let start_str = entity.start_time.format(&Iso8601::DATE_TIME).map_db_error()?;
        let end_str = entity.end_time.format(&Iso8601::DATE_TIME).map_db_error()?;
        let created_str = entity.created.format(&Iso8601::DATE_TIME).map_db_error()?;
        query(
            "INSERT INTO shift (id, employee_id, date, start_time, end_time, role, shift_type, created, update_process)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id_vec)
        .bind(employee_id_vec)
        .bind(date_str)
        .bind(start_str)
        .bind(end_str)
        .bind(entity.role.as_ref())
        .bind(entity.shift_type.as_ref())
        .bind(created_str)
        .bind(process)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn update(
        &self,
        entity: &ShiftEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id_vec = entity.id.as_bytes().to_vec();
        let employee_id_vec = entity.employee_id.as_bytes().to_vec();
        let date_str = entity.date.format(&Iso8601::DATE).map_db_error()?;
        let start_str = entity.start_time.format(&Iso8601::DATE_TIME).map_db_error()?;
        let end_str = entity.end_time.format(&Iso8601::DATE_TIME).map_db_error()?;
        query(
            "UPDATE shift SET employee_id = ?, date = ?, start_time = ?, end_time = ?, role = ?, shift_type = ?, update_process = ?
               WHERE id = ?",
        )
        .bind(employee_id_vec)
        .bind(date_str)
        .bind(start_str)
        .bind(end_str)
        .bind(entity.role.as_ref())
        .bind(entity.shift_type.as_ref())
        .bind(process)
        .bind(id_vec)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn delete(&self, id: Uuid, tx: Self::Transaction) -> Result<(), DaoError> {
        let id_vec = id.as_bytes().to_vec();
        query("DELETE FROM shift WHERE id = ?")
            .bind(id_vec)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?;
        Ok(())
    }
}
