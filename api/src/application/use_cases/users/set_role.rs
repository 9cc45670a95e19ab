use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{Role, User};

pub struct SetUserRole<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> SetUserRole<'a, R> {
    pub async fn execute(&self, actor: &Principal, id: Uuid, role: Role) -> ServiceResult<User> {
        let admin = access::require_role(self.repo, actor, Role::Admin).await?;
        let user = self
            .repo
            .set_role(id, role)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User {id} not found !")))?;
        tracing::info!(user_id = %id, role = %role, granted_by = %admin.id, "user_role_changed");
        Ok(user)
    }
}
