/*
 * Responsibility
 * - v1 URL layout
 * - Which routes require a bearer token (access::apply) and which only
 *   attach the user when one is present (access::apply_optional)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    orgs::{get_org, org_admin},
    users::{hello, whoami},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/whoami", get(whoami))
        .route("/orgs/{org_id}", get(get_org))
        .route("/orgs/{org_id}/admin", get(org_admin));

    let public = Router::new().route("/hello", get(hello));

    access::apply(protected, state.clone()).merge(access::apply_optional(public, state))
}
