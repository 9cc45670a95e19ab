use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::access_tokens::{AccessTokenPort, IssuedToken, TokenError};
use crate::domain::users::user::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Role at issue time. Informational only; gated operations re-read the user.
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 bearer tokens signed with the configured secret.
pub struct JwtAccessTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtAccessTokens {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    fn validation() -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 0;
        v
    }
}

impl AccessTokenPort for JwtAccessTokens {
    fn issue(&self, user: &User) -> anyhow::Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::Role;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            pseudo: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: String::new(),
            role: Role::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let tokens = JwtAccessTokens::new("test-secret", 60);
        let user = user();
        let issued = tokens.issue(&user).unwrap();
        assert_eq!(tokens.verify(&issued.token), Ok(user.id));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let issued = JwtAccessTokens::new("one", 60).issue(&user()).unwrap();
        let other = JwtAccessTokens::new("two", 60);
        assert_eq!(other.verify(&issued.token), Err(TokenError::Invalid));
        assert_eq!(other.verify("garbage"), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let tokens = JwtAccessTokens::new("test-secret", -120);
        let issued = tokens.issue(&user()).unwrap();
        assert_eq!(tokens.verify(&issued.token), Err(TokenError::Expired));
    }
}
