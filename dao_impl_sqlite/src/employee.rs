use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    employee::{EmployeeDao, EmployeeEntity},
    DaoError,
};
use sqlx::query_as;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct EmployeeDb {
    id: Vec<u8>,
    name: String,
    email: String,
    department: Option<String>,
}
impl TryFrom<&EmployeeDb> for EmployeeEntity {
    type Error = DaoError;
    fn try_from(employee: &EmployeeDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(employee.id.as_ref())?,
            name: employee.name.as_str().into(),
            email: employee.email.as_str().into(),
            department: employee.department.as_ref().map(|s| s.as_str().into()),
        })
    }
}

pub struct EmployeeDaoImpl {
    pub pool: Arc<sqlx::SqlitePool>,
}
impl EmployeeDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDao for EmployeeDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<EmployeeEntity>, DaoError> {
        let id_vec = id.as_bytes().to_vec();
        query_as::<_, EmployeeDb>(
            "SELECT id, name, email, department FROM employee WHERE id = ?",
        )
        .bind(id_vec)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(EmployeeEntity::try_from)
        .transpose()
    }

    async fn find_all(
        &self,
        department: Option<Arc<str>>,
        tx: Self::Transaction,
    ) -> Result<Arc<[EmployeeEntity]>, DaoError> {
        let department = department.map(|department| department.to_string());
        query_as::<_, EmployeeDb>(
            "SELECT id, name, email, department FROM employee
               WHERE (?1 IS NULL OR department = ?1)
               ORDER BY name",
        )
        .bind(department)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(EmployeeEntity::try_from)
        .collect::<Result<Arc<[EmployeeEntity]>, DaoError>>()
    }
}
