use std::sync::Arc;

use async_trait::async_trait;
use service::{permission::Authentication, user_service::UserService, ServiceError};

/// Development identity provider: the caller's username arrives unverified
/// through the `mock_auth` middleware. An OIDC-backed implementation takes
/// its place in production deployments.
pub struct UserServiceDev;

#[async_trait]
impl UserService for UserServiceDev {
    type Context = Option<Arc<str>>;

    async fn current_user(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<str>, ServiceError> {
        match context {
            Authentication::Full => Ok("SYSTEM".into()),
            Authentication::Context(Some(user)) => Ok(user),
            Authentication::Context(None) => Err(ServiceError::Forbidden),
        }
    }
}
