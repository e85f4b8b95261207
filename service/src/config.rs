use async_trait::async_trait;
use mockall::automock;

use crate::ServiceError;

pub struct Config {
    /// When set, approving a swap request re-runs the conflict checker for
    /// the incoming employee before the shift is reassigned. Off by
    /// default: the legacy behavior reassigns unchecked, which can create a
    /// double-booking, and existing installations rely on it.
    pub revalidate_swap_approvals: bool,
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;
}
