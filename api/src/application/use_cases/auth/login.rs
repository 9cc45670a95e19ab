use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::access_tokens::{AccessTokenPort, IssuedToken};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::user::User;

pub struct Login<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: AccessTokenPort + ?Sized,
{
    pub repo: &'a R,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: IssuedToken,
}

impl<'a, R, T> Login<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: AccessTokenPort + ?Sized,
{
    pub async fn execute(&self, req: &LoginRequest) -> ServiceResult<LoginOutcome> {
        let invalid = || ServiceError::Auth("Invalid email or password !".into());
        let user = self
            .repo
            .find_by_email(req.email.trim(), RecordScope::Active)
            .await?
            .ok_or_else(invalid)?;
        if !passwords::verify_password(&req.password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "login_password_mismatch");
            return Err(invalid());
        }
        let token = self.tokens.issue(&user)?;
        Ok(LoginOutcome { user, token })
    }
}
