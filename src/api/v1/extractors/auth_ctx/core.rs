use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::user::AuthContext;

/// Handler-side access to the authenticated user.
///
/// The access middleware must have inserted an `AuthContext` into the request
/// extensions; otherwise (route not behind the middleware, or optional auth
/// without a token) this rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthCtx(pub AuthContext);

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthCtx)
            .ok_or(AppError::Unauthorized)
    }
}

/// The user when one is attached, for routes behind the optional middleware.
#[derive(Debug, Clone)]
pub struct MaybeAuthCtx(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuthCtx
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthContext>().cloned()))
    }
}
