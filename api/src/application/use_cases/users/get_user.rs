use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{Role, User};

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<User> {
        access::require_role(self.repo, actor, Role::Employee).await?;
        self.repo
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User {id} not found !")))
    }
}
