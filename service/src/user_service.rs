use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::permission::Authentication;
use crate::ServiceError;

#[automock(type Context=();)]
#[async_trait]
pub trait UserService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;

    async fn current_user(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<str>, ServiceError>;
}
