use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{DaoError, MockTransaction};

/// Roster record. Identity and employment data are owned by an external
/// collaborator; the scheduling core treats the roster as read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub name: Arc<str>,
    pub email: Arc<str>,
    pub department: Option<Arc<str>>,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait EmployeeDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<EmployeeEntity>, DaoError>;
    async fn find_all(
        &self,
        department: Option<Arc<str>>,
        tx: Self::Transaction,
    ) -> Result<Arc<[EmployeeEntity]>, DaoError>;
}
