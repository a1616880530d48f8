/*
 * Responsibility
 * - GET /whoami (requires auth): the caller's AuthContext as JSON
 * - GET /hello  (optional auth): greets the caller or an anonymous visitor
 */
use axum::Json;

use crate::api::v1::dto::users::HelloResponse;
use crate::api::v1::extractors::{AuthCtx, MaybeAuthCtx};
use crate::user::AuthContext;

pub async fn whoami(AuthCtx(user): AuthCtx) -> Json<AuthContext> {
    Json(user)
}

pub async fn hello(MaybeAuthCtx(user): MaybeAuthCtx) -> Json<HelloResponse> {
    let res = match user {
        Some(user) => HelloResponse {
            message: format!("hello, {}", user.email),
            authenticated: true,
            impersonated: user.is_impersonated(),
        },
        None => HelloResponse {
            message: "hello, anonymous".to_string(),
            authenticated: false,
            impersonated: false,
        },
    };

    Json(res)
}
