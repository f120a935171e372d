use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::ApiError;

pub const MISSING_TOKEN: &str = "Authentication Token is missing!";
pub const INVALID_TOKEN: &str = "Invalid Authentication token!";

/// Authenticated principal for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

/// Guards the private router: verifies the bearer token and stores the
/// resulting [`AuthUser`] in request extensions.
pub async fn require_token(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header).ok_or_else(|| {
        warn!(uri = %req.uri(), "missing bearer token");
        ApiError::Unauthorized(MISSING_TOKEN.into())
    })?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(reason = %e, uri = %req.uri(), "rejected bearer token");
        ApiError::Unauthorized(INVALID_TOKEN.into())
    })?;

    req.extensions_mut().insert(AuthUser(claims.username));
    Ok(next.run(req).await)
}

/// Token part of `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("bearer abc ")), Some("abc"));
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(Some("Bearer   ")), None);
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(None), None);
    }
}
