use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, optional};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::user::{User, UserPatch};

pub struct UpdateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub pseudo: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> UpdateUser<'a, R> {
    // target: None => the caller's own account
    pub async fn execute(
        &self,
        actor: &Principal,
        target: Option<Uuid>,
        req: &UpdateUserRequest,
    ) -> ServiceResult<User> {
        let acting = access::require_user(self.repo, actor).await?;
        let id = target.unwrap_or(acting.id);
        access::ensure_owner_or_admin(&acting, id)?;

        let password_hash = match req.password.as_deref() {
            Some("") => return Err(ServiceError::validation("`password` cannot be empty")),
            Some(plain) => Some(passwords::hash_password(plain)?),
            None => None,
        };
        let patch = UserPatch {
            pseudo: optional("pseudo", req.pseudo.as_deref())?,
            email: optional("email", req.email.as_deref())?,
            password_hash,
        };
        self.repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User {id} not found !")))
    }
}
