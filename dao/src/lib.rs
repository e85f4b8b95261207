use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod employee;
pub mod leave;
pub mod shift;
pub mod swap;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid UUID in database: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Cannot parse date/time: {0}")]
    DateTimeParseError(#[from] time::error::Parse),

    #[error("Unknown enum value: {0}")]
    EnumValueNotFound(Arc<str>),
}

/// Marker for a storage transaction handle. A conflict check and the write
/// it guards must share one transaction, so every DAO call takes one.
pub trait Transaction: Clone + Debug + Send + Sync + 'static {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockTransaction;
impl Transaction for MockTransaction {}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait TransactionDao {
    type Transaction: Transaction;

    async fn new_transaction(&self) -> Result<Self::Transaction, DaoError>;
    async fn use_transaction(
        &self,
        tx: Option<Self::Transaction>,
    ) -> Result<Self::Transaction, DaoError>;
    async fn commit(&self, transaction: Self::Transaction) -> Result<(), DaoError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEntity {
    pub name: Arc<str>,
}

#[automock]
#[async_trait]
pub trait PermissionDao {
    async fn has_privilege(&self, user: &str, privilege: &str) -> Result<bool, DaoError>;
    async fn find_user(&self, username: &str) -> Result<Option<UserEntity>, DaoError>;
    async fn create_user(&self, user: &UserEntity, process: &str) -> Result<(), DaoError>;
    async fn add_user_role(&self, user: &str, role: &str, process: &str) -> Result<(), DaoError>;
}
