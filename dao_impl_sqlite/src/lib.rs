use std::sync::Arc;

use async_trait::async_trait;
use dao::{DaoError, Transaction};
use sqlx::{query, Row, SqlitePool};
use tokio::sync::Mutex;

pub mod employee;
pub mod leave;
pub mod shift;
pub mod swap;

pub trait ResultDbErrorExt<T, E> {
    fn map_db_error(self) -> Result<T, DaoError>;
}
impl<T, E: std::error::Error + Send + Sync + 'static> ResultDbErrorExt<T, E> for Result<T, E> {
    fn map_db_error(self) -> Result<T, DaoError> {
        self.map_err(|err| DaoError::DatabaseQueryError(Box::new(err)))
    }
}

#[derive(Clone, Debug)]
pub struct TransactionImpl {
    tx: Arc<Mutex<sqlx::Transaction<'static, sqlx::Sqlite>>>,
}

impl Transaction for TransactionImpl {}

pub struct TransactionDaoImpl {
    pool: Arc<SqlitePool>,
}
impl TransactionDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}
#[async_trait]
impl dao::TransactionDao for TransactionDaoImpl {
    type Transaction = TransactionImpl;

    async fn new_transaction(&self) -> Result<Self::Transaction, DaoError> {
        tracing::debug!("Starting new transaction");
        let tx = self.pool.begin().await.map_db_error()?;
        Ok(TransactionImpl {
            tx: Arc::new(tx.into()),
        })
    }

    async fn use_transaction(
        &self,
        tx: Option<Self::Transaction>,
    ) -> Result<Self::Transaction, DaoError> {
        match tx {
            Some(tx) => Ok(tx),
            None => self.new_transaction().await,
        }
    }

    // Nested service calls share the handle via `Arc`, so only the
    // outermost holder actually commits.
    async fn commit(&self, transaction: Self::Transaction) -> Result<(), DaoError> {
        if let Some(tx) = Arc::into_inner(transaction.tx) {
            tx.into_inner().commit().await.map_db_error()?;
        }
        Ok(())
    }
}

pub struct PermissionDaoImpl {
    pool: Arc<SqlitePool>,
}
impl PermissionDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}
#[async_trait]
impl dao::PermissionDao for PermissionDaoImpl {
    async fn has_privilege(&self, user: &str, privilege: &str) -> Result<bool, dao::DaoError> {
        let row = query(
            r"SELECT count(*) as results FROM user
                 INNER JOIN user_role ON user.name = user_role.user_name
                 INNER JOIN role ON user_role.role_name = role.name
                 INNER JOIN role_privilege ON role.name = role_privilege.role_name
                 WHERE role_privilege.privilege_name = ? AND user.name = ?",
        )
        .bind(privilege)
        .bind(user)
        .fetch_one(self.pool.as_ref())
        .await
        .map_db_error()?;
        let results: i64 = row.try_get("results").map_db_error()?;
        Ok(results > 0)
    }

    async fn find_user(&self, username: &str) -> Result<Option<dao::UserEntity>, DaoError> {
        let result = query(r"SELECT name FROM user WHERE name = ?")
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_db_error()?;
        result
            .map(|row| {
                Ok(dao::UserEntity {
                    name: row.try_get::<String, _>("name").map_db_error()?.into(),
                })
            })
            .transpose()
    }

    async fn create_user(&self, user: &dao::UserEntity, process: &str) -> Result<(), DaoError> {
        query(r"INSERT INTO user (name, update_process) VALUES (?, ?)")
            .bind(user.name.as_ref())
            .bind(process)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn add_user_role(&self, user: &str, role: &str, process: &str) -> Result<(), DaoError> {
        query(r"INSERT INTO user_role (user_name, role_name, update_process) VALUES (?, ?, ?)")
            .bind(user)
            .bind(role)
            .bind(process)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }
}
