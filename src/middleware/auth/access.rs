//! access token (RS256 JWT) verification → AuthContext in request extensions
//!
//! - `apply`: every request must carry a valid `Authorization: Bearer <jwt>`,
//!   otherwise 401.
//! - `apply_optional`: a valid token attaches the user, anything else passes
//!   through anonymously.
//!
//! Handlers read the result through `api::v1::extractors::{AuthCtx, MaybeAuthCtx}`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Require authentication on every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/whoami", get(whoami));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Attach the user when a valid token is present; never reject.
pub fn apply_optional(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(
        state,
        optional_access_middleware,
    ))
}

/// `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let user = state.auth.verify_user(token).inspect_err(|err| {
        tracing::warn!(error = %err, "access token verification failed");
    })?;

    tracing::debug!(user_id = %user.user_id, "request authenticated");

    // middleware → extractor
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

async fn optional_access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.auth.verify_user(token) {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid access token on optional route");
            }
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
