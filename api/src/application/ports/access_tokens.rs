use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Signs and checks the bearer credentials handed out at login.
pub trait AccessTokenPort: Send + Sync {
    fn issue(&self, user: &User) -> anyhow::Result<IssuedToken>;
    /// Returns the user id the token was issued for.
    fn verify(&self, token: &str) -> Result<Uuid, TokenError>;
}
