use crate::gen_service_impl;

use async_trait::async_trait;
use dao::PermissionDao;
use service::{
    permission::Authentication, user_service::UserService, PermissionService, ServiceError,
};

gen_service_impl! {
    struct PermissionServiceImpl: PermissionService = PermissionServiceDeps {
        PermissionDao: PermissionDao = permission_dao,
        UserService: UserService<Context = Self::Context> = user_service,
    }
}

#[async_trait]
impl<Deps: PermissionServiceDeps> PermissionService for PermissionServiceImpl<Deps> {
    type Context = Deps::Context;

    async fn check_permission(
        &self,
        privilege: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        match &context {
            Authentication::Full => Ok(()),
            Authentication::Context(_) => {
                let user = self.user_service.current_user(context.clone()).await?;
                if self
                    .permission_dao
                    .has_privilege(user.as_ref(), privilege)
                    .await?
                {
                    Ok(())
                } else {
                    tracing::info!(user = user.as_ref(), privilege, "permission denied");
                    Err(ServiceError::Forbidden)
                }
            }
        }
    }
}
