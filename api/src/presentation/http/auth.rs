use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::access::Principal;
use crate::application::ports::access_tokens::TokenError;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::response::ApiError;

/// Raw credential from the `Authorization` header. Accepts both
/// `Bearer <token>` and a bare token.
pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();
        match extract_token(raw) {
            Some(token) => Ok(Bearer(token.to_string())),
            None => Err(ApiError::unauthorized("No token provided !")),
        }
    }
}

fn extract_token(header: &str) -> Option<&str> {
    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => header,
    };
    (!token.is_empty()).then_some(token)
}

/// A caller whose token verified. Carries only the id; role checks re-read
/// the user in the use case.
pub struct Authenticated(pub Principal);

#[axum::async_trait]
impl FromRequestParts<AppContext> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, ctx).await?;
        match ctx.access_tokens().verify(&token) {
            Ok(user_id) => Ok(Authenticated(Principal::new(user_id))),
            Err(TokenError::Expired) => Err(ApiError::unauthorized("Token expired !")),
            Err(TokenError::Invalid) => Err(ApiError::unauthorized("Invalid token !")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_prefixed_tokens() {
        assert_eq!(extract_token("abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("bearer  abc.def"), Some("abc.def"));
    }

    #[test]
    fn rejects_empty_and_foreign_schemes() {
        assert_eq!(extract_token(""), None);
        assert_eq!(extract_token("Bearer "), None);
        assert_eq!(extract_token("Basic dXNlcjpwYXNz"), None);
    }
}
