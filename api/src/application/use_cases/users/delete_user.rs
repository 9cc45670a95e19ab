use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;

pub struct DeleteUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteUser<'a, R> {
    // target: None => the caller's own account
    pub async fn execute(&self, actor: &Principal, target: Option<Uuid>) -> ServiceResult<Uuid> {
        let acting = access::require_user(self.repo, actor).await?;
        let id = target.unwrap_or(acting.id);
        access::ensure_owner_or_admin(&acting, id)?;
        if !self.repo.soft_delete(id).await? {
            return Err(ServiceError::not_found(format!("User {id} not found !")));
        }
        tracing::info!(user_id = %id, deleted_by = %acting.id, "user_soft_deleted");
        Ok(id)
    }
}
