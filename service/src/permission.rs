use std::fmt::Debug;

use async_trait::async_trait;
use mockall::automock;

use crate::ServiceError;

/// May create, update and delete shifts and process bulk imports.
pub const PLANNER_PRIVILEGE: &str = "planner";
/// May read schedules and availability, file swap requests and resolve
/// them. Swap resolution accepts either privilege.
pub const STAFF_PRIVILEGE: &str = "staff";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authentication<Context: Clone + PartialEq + Eq + Send + Sync + Debug + 'static> {
    /// Internal caller, bypasses permission checks.
    Full,
    Context(Context),
}

impl<Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static> From<Context>
    for Authentication<Context>
{
    fn from(context: Context) -> Self {
        Self::Context(context)
    }
}

#[automock(type Context=();)]
#[async_trait]
pub trait PermissionService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;

    async fn check_permission(
        &self,
        privilege: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError>;
}
