use crate::application::access::{self, Principal};
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::listing::ListQuery;
use crate::domain::users::user::{Role, User, UserSort};

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(
        &self,
        actor: &Principal,
        query: &ListQuery<UserSort>,
    ) -> ServiceResult<Vec<User>> {
        access::require_role(self.repo, actor, Role::Employee).await?;
        Ok(self.repo.list(query).await?)
    }
}
