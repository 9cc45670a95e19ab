use crate::application::access::{self, Principal};
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, actor: &Principal) -> ServiceResult<User> {
        access::require_user(self.repo, actor).await
    }
}
