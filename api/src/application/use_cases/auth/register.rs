use crate::application::error::{ServiceError, ServiceResult, required};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::user::{NewUser, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub pseudo: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<User> {
        let pseudo = required("pseudo", &req.pseudo)?;
        let email = required("email", &req.email)?;
        if req.password.is_empty() {
            return Err(ServiceError::validation("`password` is required"));
        }
        let password_hash = passwords::hash_password(&req.password)?;
        let user = self
            .repo
            .create_user(&NewUser {
                pseudo,
                email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %user.id, "user_registered");
        Ok(user)
    }
}
